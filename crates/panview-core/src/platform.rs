//! Platform abstraction traits for the PanView runtime.
//!
//! These traits allow the runtime to delegate scheduling and clock
//! responsibilities to the host platform, enabling integration with
//! different event loops without depending directly on them.

use web_time::Instant;

/// Schedules work for the runtime.
///
/// Implementations are responsible for waking the host so that it drains
/// pending frame callbacks. They must be safe to use from multiple threads.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

/// Provides timing information for the runtime.
pub trait Clock: Send + Sync {
    /// Instant type produced by this clock implementation.
    type Instant: Copy + Send + Sync;

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;

    /// Returns the number of milliseconds elapsed since `since`.
    fn elapsed_millis(&self, since: Self::Instant) -> u64;
}

/// Wall clock backed by `web_time::Instant`, usable on desktop and wasm alike.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn elapsed_millis(&self, since: Self::Instant) -> u64 {
        since.elapsed().as_millis() as u64
    }
}
