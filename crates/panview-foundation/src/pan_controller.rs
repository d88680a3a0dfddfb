//! Pan/fling state machine.
//!
//! Three sources can move the surface: a live drag, a programmatic
//! [`hide`](PanController::hide)/[`pan`](PanController::pan) request, and the
//! snap animation started when a drag is released. The controller keeps them
//! mutually exclusive: a drag that claims its gesture stops any animation,
//! and an animation that starts during a drag ends that drag.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use panview_core::RuntimeHandle;

use crate::config::PanConfig;
use crate::error::PanError;
use crate::pan_animation::PanAnimation;
use crate::surface::{PanBounds, PanListener, PanSurface};

/// Who owns the current gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GestureOwnership {
    /// No move seen since the last down.
    Undecided,
    /// The first move was horizontal; the drag belongs to the controller.
    Claimed,
    /// The first move was vertical, or an animation ended the drag. Moves are
    /// ignored until the next down.
    Rejected,
    /// The pointer lifted. Stray moves are ignored until the next down.
    Released,
}

struct PanControllerInner {
    surface: Rc<dyn PanSurface>,
    bounds: Rc<dyn PanBounds>,
    listener: Option<Rc<dyn PanListener>>,
    config: PanConfig,
    gesture: GestureOwnership,
    animation: PanAnimation,
}

/// Horizontal pan controller with snap-to-edge animation.
///
/// Cloning yields another handle to the same controller. All handles must
/// stay on the thread that owns the runtime; there is no locking and none is
/// needed as long as that precondition holds.
#[derive(Clone)]
pub struct PanController {
    inner: Rc<RefCell<PanControllerInner>>,
}

impl PanController {
    pub fn new(
        runtime: RuntimeHandle,
        surface: Rc<dyn PanSurface>,
        bounds: Rc<dyn PanBounds>,
    ) -> Self {
        Self::build(runtime, surface, bounds, PanConfig::default())
    }

    pub fn with_config(
        runtime: RuntimeHandle,
        surface: Rc<dyn PanSurface>,
        bounds: Rc<dyn PanBounds>,
        config: PanConfig,
    ) -> Result<Self, PanError> {
        if let Err(err) = config.validate() {
            log::warn!("rejecting pan config {:?}: {}", config, err);
            return Err(err);
        }
        Ok(Self::build(runtime, surface, bounds, config))
    }

    fn build(
        runtime: RuntimeHandle,
        surface: Rc<dyn PanSurface>,
        bounds: Rc<dyn PanBounds>,
        config: PanConfig,
    ) -> Self {
        let inner = PanControllerInner {
            surface,
            bounds,
            listener: None,
            config,
            gesture: GestureOwnership::Undecided,
            animation: PanAnimation::new(runtime),
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Installs the lifecycle listener. Only one listener may ever be set.
    pub fn set_listener(&self, listener: Rc<dyn PanListener>) -> Result<(), PanError> {
        let mut inner = self.inner.borrow_mut();
        if inner.listener.is_some() {
            log::warn!("pan listener already set; keeping the first one");
            return Err(PanError::ListenerAlreadySet);
        }
        inner.listener = Some(listener);
        Ok(())
    }

    pub fn config(&self) -> PanConfig {
        self.inner.borrow().config.clone()
    }

    /// True while a live drag owns the surface.
    pub fn is_focused(&self) -> bool {
        self.inner.borrow().gesture == GestureOwnership::Claimed
    }

    /// True while a snap animation still has frames to emit.
    pub fn is_animating(&self) -> bool {
        self.animation().is_running()
    }

    /// Whether the surface is panned, or is animating towards a panned
    /// offset. Reports the intended end state rather than the transient
    /// mid-animation offset.
    pub fn is_panned(&self) -> bool {
        match self.animation().target_offset() {
            Some(target) => target != 0,
            None => self.surface().offset() != 0,
        }
    }

    /// False until the surface has a non-zero measured width and height.
    pub fn is_surface_ready(&self) -> bool {
        let (width, height) = self.surface().measured_size();
        width != 0 && height != 0
    }

    /// Current maximum travel, never negative.
    pub fn max_pan(&self) -> i32 {
        let bounds = self.inner.borrow().bounds.clone();
        bounds.max_pan().max(0)
    }

    /// Animates to the fully panned edge (`-max_pan`).
    ///
    /// Returns `false` only when the surface is not measured yet. Already
    /// panned (or heading there) counts as success and starts nothing.
    pub fn hide(&self) -> bool {
        if !self.is_surface_ready() {
            return false;
        }
        if self.is_panned() {
            return true;
        }

        let start = self.surface().offset();
        let target = -self.max_pan();
        self.fling(start, target - start);
        true
    }

    /// Animates to the fully open edge (`0`).
    ///
    /// Returns `false` only when the surface is not measured yet. Already
    /// open (or heading there) counts as success and starts nothing.
    pub fn pan(&self) -> bool {
        if !self.is_surface_ready() {
            return false;
        }
        if !self.is_panned() {
            return true;
        }

        let start = self.surface().offset();
        self.fling(start, -start);
        true
    }

    /// Stops any animation immediately, leaving the surface where it is.
    ///
    /// The stopped animation never reports completion.
    pub fn stop(&self) {
        if self.animation().cancel() {
            log::debug!("pan animation stopped at {}", self.surface().offset());
        }
    }

    /// Starts a snap animation travelling `delta` from `start`.
    ///
    /// A zero `delta` starts nothing and returns `false`. A live drag is
    /// ended: the rest of its gesture is ignored.
    pub fn fling(&self, start: i32, delta: i32) -> bool {
        if delta == 0 {
            return false;
        }
        log::trace!("fling from {} by {}", start, delta);

        let (animation, surface, config) = {
            let mut inner = self.inner.borrow_mut();
            if inner.gesture == GestureOwnership::Claimed {
                log::debug!("fling ends the live drag");
                inner.gesture = GestureOwnership::Rejected;
            }
            (
                inner.animation.clone(),
                inner.surface.clone(),
                inner.config.clone(),
            )
        };

        let weak = Rc::downgrade(&self.inner);
        animation.start(
            start,
            delta,
            config.easing,
            config.duration_millis,
            move |dx| surface.scroll_by(dx),
            move || Self::notify_pan_end(&weak),
        )
    }

    /// Handles a pointer going down. Never consumes the event.
    pub fn on_down(&self) -> bool {
        self.stop();
        self.inner.borrow_mut().gesture = GestureOwnership::Undecided;

        if let Some(listener) = self.listener() {
            listener.on_pan_start();
        }
        false
    }

    /// Handles a scroll step of `dx`/`dy` since the previous event.
    ///
    /// The first move of a gesture decides ownership: horizontal-dominant
    /// motion claims the whole gesture, vertical-dominant motion gives it up
    /// until the next down. Returns whether the controller consumed the move.
    pub fn on_scroll(&self, dx: i32, dy: i32) -> bool {
        let gesture = self.inner.borrow().gesture;
        match gesture {
            GestureOwnership::Claimed => {
                self.pan_by(dx);
                true
            }
            GestureOwnership::Rejected | GestureOwnership::Released => false,
            GestureOwnership::Undecided => {
                if dx.unsigned_abs() < dy.unsigned_abs() {
                    log::debug!("vertical move ({}, {}); gesture rejected", dx, dy);
                    self.inner.borrow_mut().gesture = GestureOwnership::Rejected;
                    return false;
                }
                log::debug!("horizontal move ({}, {}); gesture claimed", dx, dy);
                self.stop();
                self.inner.borrow_mut().gesture = GestureOwnership::Claimed;
                self.pan_by(dx);
                true
            }
        }
    }

    /// Handles the pointer lifting. Snaps to the nearest edge if a drag was
    /// live; otherwise does nothing and reports "not consumed".
    ///
    /// Only the next down starts a new gesture: moves arriving after the up
    /// are ignored, so they can neither claim the surface nor stop the snap.
    pub fn on_up(&self) -> bool {
        let was_focused = {
            let mut inner = self.inner.borrow_mut();
            let was_focused = inner.gesture == GestureOwnership::Claimed;
            inner.gesture = GestureOwnership::Released;
            was_focused
        };
        if !was_focused {
            return false;
        }

        self.complete_panning();
        true
    }

    /// Moves the surface 1:1 with the finger, clamped to `[-max_pan, 0]`.
    /// Does nothing unless a drag is live.
    pub fn pan_by(&self, dx: i32) {
        if !self.is_focused() {
            return;
        }

        let surface = self.surface();
        let start = surface.offset();
        let effective = clamped_pan_delta(start, dx, self.max_pan());
        log::trace!(
            "pan {} by {} (requested {}) from {}",
            if dx < 0 { "right" } else { "left" },
            effective,
            dx,
            start
        );
        if effective != 0 {
            surface.scroll_by(effective);
        }
    }

    fn complete_panning(&self) {
        let current = self.surface().offset();
        let target = snap_target(current, self.max_pan());
        self.fling(current, target - current);
    }

    fn notify_pan_end(inner: &Weak<RefCell<PanControllerInner>>) {
        let Some(inner) = inner.upgrade() else {
            return;
        };
        let listener = inner.borrow().listener.clone();
        if let Some(listener) = listener {
            listener.on_pan_end();
        }
    }

    fn surface(&self) -> Rc<dyn PanSurface> {
        self.inner.borrow().surface.clone()
    }

    fn animation(&self) -> PanAnimation {
        self.inner.borrow().animation.clone()
    }

    fn listener(&self) -> Option<Rc<dyn PanListener>> {
        self.inner.borrow().listener.clone()
    }
}

/// Delta that moves `start` by at most `dx` without leaving `[-max_pan, 0]`.
///
/// Negative `dx` pans further (towards `-max_pan`), positive `dx` opens
/// (towards `0`). A surface already fully open refuses to move further open.
pub fn clamped_pan_delta(start: i32, dx: i32, max_pan: i32) -> i32 {
    if dx < 0 {
        let limit = -max_pan;
        if start.saturating_add(dx) < limit {
            limit - start
        } else {
            dx
        }
    } else {
        if start == 0 {
            return 0;
        }
        if start.saturating_add(dx) > 0 {
            -start
        } else {
            dx
        }
    }
}

/// Edge a released drag snaps to: `0` when `offset` lies strictly on the open
/// side of the midpoint `-max_pan / 2`, `-max_pan` otherwise.
pub fn snap_target(offset: i32, max_pan: i32) -> i32 {
    let middle = -max_pan / 2;
    if offset > middle {
        0
    } else {
        -max_pan
    }
}

#[cfg(test)]
#[path = "tests/pan_controller_tests.rs"]
mod tests;
