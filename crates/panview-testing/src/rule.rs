//! Deterministic harness around a `PanController`.
//!
//! The rule owns a runtime, wires a [`TestSurface`], [`SharedBounds`] and a
//! [`RecordingListener`] into a controller, and advances frames at a fixed
//! ~60 FPS cadence so animation tests never depend on wall time.

use crate::assertions::assert_offset_in_bounds;
use crate::doubles::{RecordingListener, SharedBounds, TestSurface};
use panview_core::{DefaultScheduler, Runtime, RuntimeHandle};
use panview_foundation::{PanConfig, PanController, PanError, PanGestureDetector, PointerInput};
use std::rc::Rc;
use std::sync::Arc;

/// Frame interval used by [`PanTestRule::advance_frame`].
pub const FRAME_NANOS: u64 = 16_666_667;

/// Upper bound for [`PanTestRule::run_until_idle`].
const MAX_IDLE_FRAMES: usize = 600;

pub struct PanTestRule {
    runtime: Runtime,
    surface: Rc<TestSurface>,
    bounds: SharedBounds,
    listener: Rc<RecordingListener>,
    controller: PanController,
    detector: PanGestureDetector,
    frame_time_nanos: u64,
    trajectory: Vec<i32>,
}

impl PanTestRule {
    pub fn new(max_pan: i32) -> Self {
        let fixture = Fixture::new(max_pan, TestSurface::new());
        let controller = PanController::new(
            fixture.runtime.handle(),
            fixture.surface.clone(),
            Rc::new(fixture.bounds.clone()),
        );
        fixture.into_rule(controller)
    }

    /// Like [`new`](Self::new), but the surface starts unmeasured.
    pub fn unmeasured(max_pan: i32) -> Self {
        let fixture = Fixture::new(max_pan, TestSurface::unmeasured());
        let controller = PanController::new(
            fixture.runtime.handle(),
            fixture.surface.clone(),
            Rc::new(fixture.bounds.clone()),
        );
        fixture.into_rule(controller)
    }

    pub fn with_config(max_pan: i32, config: PanConfig) -> Result<Self, PanError> {
        let fixture = Fixture::new(max_pan, TestSurface::new());
        let controller = PanController::with_config(
            fixture.runtime.handle(),
            fixture.surface.clone(),
            Rc::new(fixture.bounds.clone()),
            config,
        )?;
        Ok(fixture.into_rule(controller))
    }

    pub fn controller(&self) -> &PanController {
        &self.controller
    }

    pub fn surface(&self) -> &TestSurface {
        &self.surface
    }

    pub fn bounds(&self) -> &SharedBounds {
        &self.bounds
    }

    pub fn listener(&self) -> &RecordingListener {
        &self.listener
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn offset(&self) -> i32 {
        use panview_foundation::PanSurface;
        self.surface.offset()
    }

    /// Runs one frame and records the resulting offset.
    pub fn advance_frame(&mut self) {
        self.frame_time_nanos += FRAME_NANOS;
        self.runtime
            .handle()
            .drain_frame_callbacks(self.frame_time_nanos);
        let offset = self.offset();
        log::trace!("frame {}ns -> offset {}", self.frame_time_nanos, offset);
        self.trajectory.push(offset);
    }

    pub fn advance_frames(&mut self, count: usize) {
        for _ in 0..count {
            self.advance_frame();
        }
    }

    /// Advances until no frame callback is pending. Returns the number of
    /// frames run.
    pub fn run_until_idle(&mut self) -> usize {
        let mut frames = 0;
        while self.runtime.handle().has_frame_callbacks() {
            assert!(
                frames < MAX_IDLE_FRAMES,
                "animation still running after {MAX_IDLE_FRAMES} frames"
            );
            self.advance_frame();
            frames += 1;
        }
        frames
    }

    /// Offsets observed after each frame since the last clear.
    pub fn trajectory(&self) -> &[i32] {
        &self.trajectory
    }

    pub fn clear_trajectory(&mut self) {
        self.trajectory.clear();
    }

    /// Sends a raw pointer sample through the gesture detector.
    pub fn pointer(&mut self, event: PointerInput) -> bool {
        self.detector.on_pointer_event(event)
    }

    /// Presses at `(from_x, y)` and moves to `(to_x, y)` in `steps` equal
    /// moves, leaving the pointer down.
    pub fn drag(&mut self, from_x: f32, to_x: f32, y: f32, steps: usize) {
        self.pointer(PointerInput::down(from_x, y));
        let steps = steps.max(1);
        for step in 1..=steps {
            let x = from_x + (to_x - from_x) * step as f32 / steps as f32;
            self.pointer(PointerInput::move_to(x, y));
        }
    }

    /// Lifts the pointer at `(x, y)`.
    pub fn release(&mut self, x: f32, y: f32) -> bool {
        self.pointer(PointerInput::up(x, y))
    }

    pub fn assert_in_bounds(&self) {
        assert_offset_in_bounds(self.offset(), self.bounds.get().max(0), "surface offset");
        for (frame, offset) in self.trajectory.iter().enumerate() {
            assert_offset_in_bounds(
                *offset,
                self.bounds.get().max(0),
                &format!("offset after frame {frame}"),
            );
        }
    }
}

struct Fixture {
    runtime: Runtime,
    surface: Rc<TestSurface>,
    bounds: SharedBounds,
}

impl Fixture {
    fn new(max_pan: i32, surface: TestSurface) -> Self {
        Self {
            runtime: Runtime::new(Arc::new(DefaultScheduler)),
            surface: Rc::new(surface),
            bounds: SharedBounds::new(max_pan),
        }
    }

    fn into_rule(self, controller: PanController) -> PanTestRule {
        let listener = Rc::new(RecordingListener::new());
        if let Err(err) = controller.set_listener(listener.clone()) {
            log::warn!("test listener not installed: {}", err);
        }
        let detector = PanGestureDetector::new(controller.clone());

        PanTestRule {
            runtime: self.runtime,
            surface: self.surface,
            bounds: self.bounds,
            listener,
            controller,
            detector,
            frame_time_nanos: 0,
            trajectory: Vec::new(),
        }
    }
}
