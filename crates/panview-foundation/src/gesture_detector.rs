//! Raw pointer stream to pan gestures.
//!
//! [`PanGestureDetector`] turns down/move/up pointer samples into the
//! `on_down` / `on_scroll` / `on_up` calls a [`PanController`] expects. Moves
//! stay below the controller until the pointer leaves the touch slop.

use crate::pan_controller::PanController;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// A single pointer sample in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    pub kind: PointerEventKind,
    pub x: f32,
    pub y: f32,
}

impl PointerInput {
    pub fn new(kind: PointerEventKind, x: f32, y: f32) -> Self {
        Self { kind, x, y }
    }

    pub fn down(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Down, x, y)
    }

    pub fn move_to(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Move, x, y)
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Up, x, y)
    }

    pub fn cancel(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Cancel, x, y)
    }
}

/// Feeds a [`PanController`] from raw pointer input.
///
/// Scroll steps are reported as the distance travelled since the previous
/// event (`previous - current`), so a finger moving right yields a negative
/// `dx`. Sub-pixel travel is carried over to the next step instead of being
/// truncated away.
pub struct PanGestureDetector {
    controller: PanController,
    touch_slop: f32,
    down_position: Option<(f32, f32)>,
    last_position: (f32, f32),
    slop_passed: bool,
    remainder: (f32, f32),
}

impl PanGestureDetector {
    pub fn new(controller: PanController) -> Self {
        let touch_slop = controller.config().touch_slop;
        Self {
            controller,
            touch_slop,
            down_position: None,
            last_position: (0.0, 0.0),
            slop_passed: false,
            remainder: (0.0, 0.0),
        }
    }

    pub fn controller(&self) -> &PanController {
        &self.controller
    }

    /// Whether a pointer is currently down.
    pub fn is_tracking(&self) -> bool {
        self.down_position.is_some()
    }

    /// Processes one pointer sample. Returns whether the controller owns the
    /// gesture after this event, i.e. whether the host should keep the event
    /// away from other handlers.
    pub fn on_pointer_event(&mut self, event: PointerInput) -> bool {
        match event.kind {
            PointerEventKind::Down => {
                self.down_position = Some((event.x, event.y));
                self.last_position = (event.x, event.y);
                self.slop_passed = false;
                self.remainder = (0.0, 0.0);
                self.controller.on_down()
            }
            PointerEventKind::Move => {
                let Some((down_x, down_y)) = self.down_position else {
                    return false;
                };

                if !self.slop_passed {
                    let travel_x = event.x - down_x;
                    let travel_y = event.y - down_y;
                    let distance_sq = travel_x * travel_x + travel_y * travel_y;
                    if distance_sq <= self.touch_slop * self.touch_slop {
                        return self.controller.is_focused();
                    }
                    self.slop_passed = true;
                }

                let raw_dx = self.last_position.0 - event.x + self.remainder.0;
                let raw_dy = self.last_position.1 - event.y + self.remainder.1;
                let dx = raw_dx.trunc();
                let dy = raw_dy.trunc();
                self.remainder = (raw_dx - dx, raw_dy - dy);
                self.last_position = (event.x, event.y);

                if dx == 0.0 && dy == 0.0 {
                    return self.controller.is_focused();
                }
                self.controller.on_scroll(dx as i32, dy as i32)
            }
            PointerEventKind::Up | PointerEventKind::Cancel => {
                if self.down_position.take().is_none() {
                    return false;
                }
                self.slop_passed = false;
                self.remainder = (0.0, 0.0);
                self.controller.on_up()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PanBounds, PanConfig, PanSurface};
    use panview_core::{DefaultScheduler, Runtime};
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::Arc;

    struct MockSurface {
        offset: Cell<i32>,
    }

    impl PanSurface for MockSurface {
        fn offset(&self) -> i32 {
            self.offset.get()
        }

        fn scroll_by(&self, dx: i32) {
            self.offset.set(self.offset.get() + dx);
        }

        fn measured_size(&self) -> (i32, i32) {
            (200, 200)
        }
    }

    fn detector(slop: f32) -> (Runtime, Rc<MockSurface>, PanGestureDetector) {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let surface = Rc::new(MockSurface {
            offset: Cell::new(0),
        });
        let bounds: Rc<dyn PanBounds> = Rc::new(|| 100);
        let controller = PanController::with_config(
            runtime.handle(),
            surface.clone(),
            bounds,
            PanConfig::default().with_touch_slop(slop),
        )
        .expect("valid config");
        (runtime, surface, PanGestureDetector::new(controller))
    }

    #[test]
    fn moves_inside_slop_do_not_pan() {
        let (_runtime, surface, mut detector) = detector(8.0);

        assert!(!detector.on_pointer_event(PointerInput::down(100.0, 50.0)));
        assert!(!detector.on_pointer_event(PointerInput::move_to(105.0, 52.0)));

        assert_eq!(surface.offset.get(), 0);
        assert!(!detector.controller().is_focused());
    }

    #[test]
    fn rightward_finger_motion_pans_negative() {
        let (_runtime, surface, mut detector) = detector(8.0);

        detector.on_pointer_event(PointerInput::down(100.0, 50.0));
        // The first step past the slop includes the travel inside it.
        assert!(detector.on_pointer_event(PointerInput::move_to(112.0, 50.0)));
        assert_eq!(surface.offset.get(), -12);

        assert!(detector.on_pointer_event(PointerInput::move_to(130.0, 51.0)));
        assert_eq!(surface.offset.get(), -30);
        assert!(detector.controller().is_focused());
    }

    #[test]
    fn vertical_swipe_is_left_alone() {
        let (_runtime, surface, mut detector) = detector(8.0);

        detector.on_pointer_event(PointerInput::down(100.0, 50.0));
        assert!(!detector.on_pointer_event(PointerInput::move_to(102.0, 80.0)));
        assert!(!detector.on_pointer_event(PointerInput::move_to(160.0, 82.0)));

        assert_eq!(surface.offset.get(), 0);
        assert!(!detector.on_pointer_event(PointerInput::up(160.0, 82.0)));
    }

    #[test]
    fn sub_pixel_steps_accumulate() {
        let (_runtime, surface, mut detector) = detector(0.0);

        detector.on_pointer_event(PointerInput::down(0.0, 0.0));
        for step in 1..=8 {
            detector.on_pointer_event(PointerInput::move_to(step as f32 * 0.5, 0.0));
        }

        assert_eq!(surface.offset.get(), -4);
    }

    #[test]
    fn release_hands_over_to_snap_animation() {
        let (runtime, surface, mut detector) = detector(8.0);

        detector.on_pointer_event(PointerInput::down(0.0, 0.0));
        detector.on_pointer_event(PointerInput::move_to(70.0, 0.0));
        assert_eq!(surface.offset.get(), -70);

        assert!(detector.on_pointer_event(PointerInput::up(70.0, 0.0)));
        assert!(!detector.is_tracking());
        assert!(detector.controller().is_animating());

        for frame in 1..=40u64 {
            runtime.handle().drain_frame_callbacks(frame * 16_000_000);
        }
        assert_eq!(surface.offset.get(), -100);
    }

    #[test]
    fn cancel_releases_like_up() {
        let (_runtime, _surface, mut detector) = detector(8.0);

        detector.on_pointer_event(PointerInput::down(0.0, 0.0));
        detector.on_pointer_event(PointerInput::move_to(-30.0, 0.0));

        assert!(detector.on_pointer_event(PointerInput::cancel(-30.0, 0.0)));
        assert!(!detector.controller().is_focused());
    }

    #[test]
    fn events_without_down_are_ignored() {
        let (_runtime, surface, mut detector) = detector(8.0);

        assert!(!detector.on_pointer_event(PointerInput::move_to(50.0, 0.0)));
        assert!(!detector.on_pointer_event(PointerInput::up(50.0, 0.0)));
        assert_eq!(surface.offset.get(), 0);
    }
}
