//! Shared gesture constants for consistent touch/pointer handling.
//!
//! These values are in logical pixels. For very high-density touch screens,
//! consider scaling by the device's DPI factor.

/// Touch slop in logical pixels.
///
/// A pointer has to travel further than this from its press position before
/// its movement is reported as a scroll. Below it, jitter of a resting finger
/// never reaches the pan controller.
pub const TOUCH_SLOP: f32 = 8.0;
