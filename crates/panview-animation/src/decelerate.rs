//! Duration-based deceleration.
//!
//! A [`DecelerationAnimator`] moves an integer offset from a start value by a
//! fixed delta over a fixed duration. It knows nothing about velocity: the
//! travelled distance is decided up front and the easing curve only shapes
//! how the distance is covered over time.

use crate::easing::Easing;

/// Default animation duration in milliseconds.
pub const DEFAULT_DURATION_MILLIS: u64 = 250;

/// Time-based interpolator from `start` to `start + delta`.
///
/// The animator is polled: callers hand it the current time through
/// [`compute_scroll_offset`](Self::compute_scroll_offset) and read the
/// resulting [`current`](Self::current) offset. The start time latches on the
/// first poll after [`start_scroll`](Self::start_scroll), so the first frame
/// always reports the start offset.
#[derive(Debug, Clone)]
pub struct DecelerationAnimator {
    easing: Easing,
    start: i32,
    delta: i32,
    final_offset: i32,
    current: i32,
    duration_millis: u64,
    start_time_millis: Option<u64>,
    finished: bool,
}

impl DecelerationAnimator {
    pub fn new(easing: Easing) -> Self {
        Self {
            easing,
            start: 0,
            delta: 0,
            final_offset: 0,
            current: 0,
            duration_millis: DEFAULT_DURATION_MILLIS,
            start_time_millis: None,
            finished: true,
        }
    }

    /// Arms the animator to travel `delta` from `start` over `duration_millis`.
    pub fn start_scroll(&mut self, start: i32, delta: i32, duration_millis: u64) {
        self.start = start;
        self.delta = delta;
        self.final_offset = start.saturating_add(delta);
        self.current = start;
        self.duration_millis = duration_millis;
        self.start_time_millis = None;
        self.finished = false;
        log::trace!(
            "scroll {} -> {} over {}ms ({:?})",
            start,
            self.final_offset,
            duration_millis,
            self.easing
        );
    }

    /// Advances the animation to `now_millis`.
    ///
    /// Returns `false` once the animation had already finished before this
    /// call. The poll that reaches the end of the duration lands exactly on
    /// the final offset, marks the animator finished, and still returns
    /// `true`.
    pub fn compute_scroll_offset(&mut self, now_millis: u64) -> bool {
        if self.finished {
            return false;
        }

        let elapsed = self.time_passed(now_millis);
        if elapsed < self.duration_millis {
            let fraction = elapsed as f32 / self.duration_millis as f32;
            let progress = self.easing.transform(fraction);
            let travelled = (progress * self.delta as f32).round() as i32;
            self.current = self.start.saturating_add(travelled);
        } else {
            self.current = self.final_offset;
            self.finished = true;
        }
        true
    }

    /// Milliseconds since the first poll, or zero before it.
    pub fn time_passed(&mut self, now_millis: u64) -> u64 {
        let start = *self.start_time_millis.get_or_insert(now_millis);
        now_millis.saturating_sub(start)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Marks the animator finished (or resumes it) without touching the
    /// current offset.
    pub fn force_finished(&mut self, finished: bool) {
        self.finished = finished;
    }

    /// Jumps to the final offset and stops.
    pub fn abort_animation(&mut self) {
        log::debug!("scroll aborted at {}, jumping to {}", self.current, self.final_offset);
        self.current = self.final_offset;
        self.finished = true;
    }

    /// Makes the animation end `extra_millis` after `now_millis`.
    pub fn extend_duration(&mut self, now_millis: u64, extra_millis: u64) {
        let passed = self.time_passed(now_millis);
        self.duration_millis = passed.saturating_add(extra_millis);
        self.finished = false;
    }

    /// Retargets the animation; the remaining time is unchanged.
    pub fn set_final_offset(&mut self, final_offset: i32) {
        self.final_offset = final_offset;
        self.delta = final_offset.saturating_sub(self.start);
        self.finished = false;
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn final_offset(&self) -> i32 {
        self.final_offset
    }

    pub fn delta(&self) -> i32 {
        self.delta
    }

    pub fn duration_millis(&self) -> u64 {
        self.duration_millis
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }
}

impl Default for DecelerationAnimator {
    fn default() -> Self {
        Self::new(Easing::default())
    }
}

#[cfg(test)]
#[path = "tests/decelerate_tests.rs"]
mod tests;
