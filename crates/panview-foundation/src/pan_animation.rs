//! Frame-driven snap animation.
//!
//! Drives a [`DecelerationAnimator`] using the runtime's frame callback
//! system. Every step reposts itself for the next frame until the animator
//! reports that it is finished.

use panview_animation::{DecelerationAnimator, Easing};
use panview_core::{FrameCallbackRegistration, FrameClock, RuntimeHandle};
use std::cell::RefCell;
use std::rc::Rc;

/// Outcome of one frame step, computed while the state is borrowed and acted
/// upon after the borrow is released.
enum FrameStep {
    Advance { diff: i32, more: bool },
    Finished,
}

/// Schedules the next animation frame.
/// This is called recursively to drive the animation forward.
fn schedule_next_frame<F, G>(
    state: Rc<RefCell<Option<PanAnimationState>>>,
    frame_clock: FrameClock,
    on_scroll: Rc<F>,
    on_end: G,
) where
    F: Fn(i32) + 'static,
    G: FnOnce() + 'static,
{
    let state_for_closure = state.clone();
    let frame_clock_for_closure = frame_clock.clone();

    let registration = frame_clock.with_frame_millis(move |frame_time_millis| {
        let step = {
            let mut state_guard = state_for_closure.borrow_mut();
            let Some(anim_state) = state_guard.as_mut() else {
                return;
            };
            // This callback is the one the registration pointed at.
            anim_state.registration = None;

            if anim_state.animator.is_finished() {
                state_guard.take();
                FrameStep::Finished
            } else {
                let more = anim_state.animator.compute_scroll_offset(frame_time_millis);
                let current = anim_state.animator.current();
                let diff = current - anim_state.previous_offset;
                anim_state.previous_offset = current;
                log::trace!(
                    "pan frame at {}ms: offset {} diff {} more {}",
                    frame_time_millis,
                    current,
                    diff,
                    more
                );
                FrameStep::Advance { diff, more }
            }
        };

        match step {
            FrameStep::Finished => {
                log::debug!("pan animation finished");
                on_end();
            }
            FrameStep::Advance { diff, more } => {
                if diff != 0 {
                    on_scroll(diff);
                }
                if more {
                    schedule_next_frame(
                        state_for_closure,
                        frame_clock_for_closure,
                        on_scroll,
                        on_end,
                    );
                }
            }
        }
    });

    // Store the registration to keep the callback alive. If the animation was
    // cancelled meanwhile, dropping it here removes the callback again.
    if let Some(anim_state) = state.borrow_mut().as_mut() {
        anim_state.registration = Some(registration);
    }
}

/// State for an in-flight animation.
struct PanAnimationState {
    animator: DecelerationAnimator,
    /// Last offset applied to the surface, used to derive per-frame deltas.
    previous_offset: i32,
    /// Pending frame callback. Dropping it unschedules the next step.
    registration: Option<FrameCallbackRegistration>,
}

/// Drives a snap animation on a pan surface.
///
/// Each frame, it calculates the offset DELTA since the previous frame and
/// hands it to the provided callback. At most one animation is in flight per
/// driver; starting a new one cancels the old one silently.
pub struct PanAnimation {
    state: Rc<RefCell<Option<PanAnimationState>>>,
    frame_clock: FrameClock,
}

impl PanAnimation {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self {
            state: Rc::new(RefCell::new(None)),
            frame_clock: runtime.frame_clock(),
        }
    }

    /// Starts animating from `start` by `delta`.
    ///
    /// * `on_scroll` - Invoked each frame with the offset DELTA (not absolute position)
    /// * `on_end` - Invoked on the frame after the animation lands
    ///
    /// Returns `false` without scheduling anything when `delta` is zero.
    pub fn start<F, G>(
        &self,
        start: i32,
        delta: i32,
        easing: Easing,
        duration_millis: u64,
        on_scroll: F,
        on_end: G,
    ) -> bool
    where
        F: Fn(i32) + 'static,
        G: FnOnce() + 'static,
    {
        self.cancel();

        if delta == 0 {
            return false;
        }

        let mut animator = DecelerationAnimator::new(easing);
        animator.start_scroll(start, delta, duration_millis);

        *self.state.borrow_mut() = Some(PanAnimationState {
            animator,
            previous_offset: start,
            registration: None,
        });

        schedule_next_frame(
            self.state.clone(),
            self.frame_clock.clone(),
            Rc::new(on_scroll),
            on_end,
        );
        true
    }

    /// Stops the animation where it is. Returns whether one was in flight.
    ///
    /// No further frame runs and `on_end` is never invoked.
    pub fn cancel(&self) -> bool {
        let Some(state) = self.state.borrow_mut().take() else {
            return false;
        };
        // Registration is dropped, cancelling the pending frame.
        drop(state.registration);
        true
    }

    /// Returns true while the animator still has offsets to emit.
    pub fn is_running(&self) -> bool {
        self.state
            .borrow()
            .as_ref()
            .is_some_and(|s| !s.animator.is_finished())
    }

    /// Offset the running animation is heading to.
    pub fn target_offset(&self) -> Option<i32> {
        self.state
            .borrow()
            .as_ref()
            .filter(|s| !s.animator.is_finished())
            .map(|s| s.animator.final_offset())
    }
}

impl Clone for PanAnimation {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            frame_clock: self.frame_clock.clone(),
        }
    }
}
