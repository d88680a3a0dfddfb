//! Horizontal pan controller for PanView.
//!
//! [`PanController`] lets a user drag a surface left and right between
//! `-max_pan` and `0`, then snaps it fully open or fully closed with a
//! fixed-duration deceleration once the finger lifts. Programmatic
//! [`hide`](PanController::hide) and [`pan`](PanController::pan) requests
//! share the same animation loop.
//!
//! Everything here is single-threaded: controllers, surfaces and listeners
//! live on the thread that owns the [`panview_core::Runtime`] driving their
//! frames.

mod config;
mod error;
pub mod gesture_constants;
mod gesture_detector;
mod pan_animation;
mod pan_controller;
mod surface;

pub use config::PanConfig;
pub use error::PanError;
pub use gesture_detector::{PanGestureDetector, PointerEventKind, PointerInput};
pub use pan_animation::PanAnimation;
pub use pan_controller::{clamped_pan_delta, snap_target, PanController};
pub use surface::{PanBounds, PanListener, PanSurface};

pub use panview_animation::Easing;

pub mod prelude {
    pub use crate::{
        Easing, PanBounds, PanConfig, PanController, PanError, PanGestureDetector, PanListener,
        PanSurface, PointerEventKind, PointerInput,
    };
}
