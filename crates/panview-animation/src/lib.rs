//! Animation primitives for PanView
//!
//! This crate provides the easing curves and the duration-based
//! [`DecelerationAnimator`] that drive snap animations.

pub mod decelerate;
pub mod easing;

pub use decelerate::{DecelerationAnimator, DEFAULT_DURATION_MILLIS};
pub use easing::Easing;

pub mod prelude {
    pub use crate::decelerate::{DecelerationAnimator, DEFAULT_DURATION_MILLIS};
    pub use crate::easing::Easing;
}
