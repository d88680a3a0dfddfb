use panview_animation::{Easing, DEFAULT_DURATION_MILLIS};

use crate::error::PanError;
use crate::gesture_constants::TOUCH_SLOP;

/// Tuning for a [`PanController`](crate::PanController).
#[derive(Clone, Debug, PartialEq)]
pub struct PanConfig {
    /// Length of every snap animation, in milliseconds.
    pub duration_millis: u64,
    /// Curve used by snap animations.
    pub easing: Easing,
    /// Distance a pointer must travel before a gesture becomes a scroll.
    pub touch_slop: f32,
}

impl Default for PanConfig {
    fn default() -> Self {
        Self {
            duration_millis: DEFAULT_DURATION_MILLIS,
            easing: Easing::ViscousFluid,
            touch_slop: TOUCH_SLOP,
        }
    }
}

impl PanConfig {
    pub fn with_duration_millis(mut self, duration_millis: u64) -> Self {
        self.duration_millis = duration_millis;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_touch_slop(mut self, touch_slop: f32) -> Self {
        self.touch_slop = touch_slop;
        self
    }

    pub fn validate(&self) -> Result<(), PanError> {
        if !self.touch_slop.is_finite() || self.touch_slop < 0.0 {
            return Err(PanError::InvalidConfig {
                reason: "touch slop must be a finite, non-negative distance",
            });
        }
        if !self.easing.is_valid() {
            return Err(PanError::InvalidConfig {
                reason: "decelerate factor must be finite and positive",
            });
        }
        Ok(())
    }
}
