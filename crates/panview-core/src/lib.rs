//! Core runtime pieces for PanView: a single-threaded frame-callback queue and
//! the clock that drives it.

pub mod frame_clock;
pub mod platform;
pub mod runtime;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use platform::{Clock, RuntimeScheduler, StdClock};
pub use runtime::{DefaultScheduler, Runtime, RuntimeHandle};

#[cfg(test)]
pub use runtime::{TestRuntime, TestScheduler};

pub(crate) type FrameCallbackId = u64;

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
