use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use panview_core::{Clock, Runtime, RuntimeHandle, RuntimeScheduler, StdClock};
use panview_foundation::{
    PanConfig, PanController, PanGestureDetector, PanListener, PanSurface, PointerInput,
};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const SURFACE_WIDTH: i32 = 360;
const DRAWER_WIDTH: i32 = 240;
const STRIP_CELLS: i32 = 40;

/// Wakes the pump loop when the runtime asks for a frame.
#[derive(Default)]
struct FlagScheduler {
    requested: AtomicBool,
}

impl FlagScheduler {
    fn take_request(&self) -> bool {
        self.requested.swap(false, Ordering::AcqRel)
    }
}

impl RuntimeScheduler for FlagScheduler {
    fn schedule_frame(&self) {
        self.requested.store(true, Ordering::Release);
    }
}

/// Surface that keeps its offset in memory and draws itself as a text strip.
struct ConsoleSurface {
    offset: Cell<i32>,
    width: i32,
}

impl ConsoleSurface {
    fn strip(&self) -> String {
        let filled =
            (-self.offset.get() * STRIP_CELLS / DRAWER_WIDTH.max(1)).clamp(0, STRIP_CELLS);
        format!(
            "[{}{}] {:>4}",
            "#".repeat(filled as usize),
            ".".repeat((STRIP_CELLS - filled) as usize),
            self.offset.get()
        )
    }
}

impl PanSurface for ConsoleSurface {
    fn offset(&self) -> i32 {
        self.offset.get()
    }

    fn scroll_by(&self, dx: i32) {
        self.offset.set(self.offset.get() + dx);
    }

    fn measured_size(&self) -> (i32, i32) {
        (self.width, 640)
    }
}

struct LoggingListener;

impl PanListener for LoggingListener {
    fn on_pan_start(&self) {
        log::info!("pointer down");
    }

    fn on_pan_end(&self) {
        log::info!("snap finished");
    }
}

enum Step {
    Pointer(PointerInput),
    Toggle,
    Settle,
}

fn script() -> Vec<Step> {
    let mut steps = vec![Step::Toggle, Step::Settle, Step::Toggle, Step::Settle];

    // Drag right past the midpoint, then release.
    steps.push(Step::Pointer(PointerInput::down(40.0, 320.0)));
    for x in (60..=200).step_by(20) {
        steps.push(Step::Pointer(PointerInput::move_to(x as f32, 322.0)));
    }
    steps.push(Step::Pointer(PointerInput::up(200.0, 322.0)));
    steps.push(Step::Settle);

    // Drag back left past the midpoint; the surface snaps open.
    steps.push(Step::Pointer(PointerInput::down(200.0, 320.0)));
    for x in (60..=180).rev().step_by(20) {
        steps.push(Step::Pointer(PointerInput::move_to(x as f32, 320.0)));
    }
    steps.push(Step::Pointer(PointerInput::up(60.0, 320.0)));
    steps.push(Step::Settle);

    // Vertical swipe: left to the host.
    steps.push(Step::Pointer(PointerInput::down(100.0, 100.0)));
    steps.push(Step::Pointer(PointerInput::move_to(104.0, 200.0)));
    steps.push(Step::Pointer(PointerInput::up(104.0, 200.0)));
    steps.push(Step::Settle);

    steps
}

struct FramePump<C: Clock> {
    handle: RuntimeHandle,
    scheduler: Arc<FlagScheduler>,
    clock: C,
    origin: C::Instant,
}

impl<C: Clock> FramePump<C> {
    fn settle(&self, surface: &ConsoleSurface) {
        while self.scheduler.take_request() && self.handle.has_frame_callbacks() {
            thread::sleep(FRAME_INTERVAL);
            let nanos = self.clock.elapsed_millis(self.origin) * 1_000_000;
            self.handle.drain_frame_callbacks(nanos);
            println!("{}", surface.strip());
        }
    }
}

fn toggle(controller: &PanController) -> bool {
    if controller.is_panned() {
        controller.pan()
    } else {
        controller.hide()
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== PanView headless demo ===");
    println!("Drawer width {DRAWER_WIDTH}px; '#' marks how far the surface is panned.");
    println!();

    let scheduler = Arc::new(FlagScheduler::default());
    let runtime = Runtime::new(scheduler.clone());
    let surface = Rc::new(ConsoleSurface {
        offset: Cell::new(0),
        width: SURFACE_WIDTH,
    });
    let controller = PanController::with_config(
        runtime.handle(),
        surface.clone(),
        Rc::new(|| DRAWER_WIDTH),
        PanConfig::default(),
    )
    .context("building pan controller")?;
    controller
        .set_listener(Rc::new(LoggingListener))
        .context("installing listener")?;
    let mut detector = PanGestureDetector::new(controller.clone());

    let clock = StdClock;
    let pump = FramePump {
        handle: runtime.handle(),
        scheduler,
        origin: clock.now(),
        clock,
    };

    for step in script() {
        match step {
            Step::Pointer(event) => {
                let consumed = detector.on_pointer_event(event);
                log::debug!(
                    "{:?} at ({}, {}) consumed={}",
                    event.kind,
                    event.x,
                    event.y,
                    consumed
                );
                println!("{}", surface.strip());
            }
            Step::Toggle => {
                let accepted = toggle(&controller);
                log::info!(
                    "toggle accepted={} panned={}",
                    accepted,
                    controller.is_panned()
                );
            }
            Step::Settle => pump.settle(&surface),
        }
    }

    log::info!("final offset {}", surface.offset());
    Ok(())
}
