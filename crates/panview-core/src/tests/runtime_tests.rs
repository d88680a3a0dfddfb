use super::*;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct CountingScheduler {
    frames: AtomicUsize,
}

impl RuntimeScheduler for CountingScheduler {
    fn schedule_frame(&self) {
        self.frames.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn frame_callbacks_fire_in_registration_order() {
    let runtime = Runtime::new(Arc::new(TestScheduler));
    let handle = runtime.handle();
    let clock = runtime.frame_clock();
    let events: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
    let mut guards = Vec::new();
    {
        let events = events.clone();
        guards.push(clock.with_frame_nanos(move |_| {
            events.borrow_mut().push("first");
        }));
    }
    {
        let events = events.clone();
        guards.push(clock.with_frame_nanos(move |_| {
            events.borrow_mut().push("second");
        }));
    }

    handle.drain_frame_callbacks(42);
    drop(guards);

    let events = events.borrow();
    assert_eq!(events.as_slice(), ["first", "second"]);
    assert!(!runtime.needs_frame());
}

#[test]
fn cancelling_frame_callback_prevents_execution() {
    let runtime = Runtime::new(Arc::new(TestScheduler));
    let handle = runtime.handle();
    let clock = runtime.frame_clock();
    let events: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));

    let registration = {
        let events = events.clone();
        clock.with_frame_nanos(move |_| {
            events.borrow_mut().push("fired");
        })
    };

    assert!(runtime.needs_frame());
    drop(registration);
    handle.drain_frame_callbacks(84);
    assert!(events.borrow().is_empty());
    assert!(!runtime.needs_frame());
}

#[test]
fn callback_registered_during_drain_waits_for_next_frame() {
    let runtime = TestRuntime::new();
    let handle = runtime.handle();
    let clock = handle.frame_clock();
    let times: Rc<RefCell<Vec<u64>>> = Rc::new(RefCell::new(Vec::new()));
    let slot: Rc<RefCell<Option<FrameCallbackRegistration>>> = Rc::new(RefCell::new(None));

    let registration = {
        let times = times.clone();
        let slot = slot.clone();
        let clock = clock.clone();
        clock.clone().with_frame_nanos(move |time| {
            times.borrow_mut().push(time);
            let times = times.clone();
            let next = clock.with_frame_nanos(move |time| {
                times.borrow_mut().push(time);
            });
            slot.borrow_mut().replace(next);
        })
    };

    handle.drain_frame_callbacks(10);
    assert_eq!(times.borrow().as_slice(), &[10]);
    assert!(handle.has_frame_callbacks());

    handle.drain_frame_callbacks(20);
    assert_eq!(times.borrow().as_slice(), &[10, 20]);
    assert!(!handle.has_frame_callbacks());
    drop(registration);
}

#[test]
fn with_frame_millis_converts_nanos() {
    let runtime = TestRuntime::new();
    let handle = runtime.handle();
    let seen = Rc::new(RefCell::new(None));

    let _registration = {
        let seen = seen.clone();
        handle
            .frame_clock()
            .with_frame_millis(move |millis| *seen.borrow_mut() = Some(millis))
    };

    handle.drain_frame_callbacks(33_000_000);
    assert_eq!(*seen.borrow(), Some(33));
}

#[test]
fn registering_asks_scheduler_for_a_frame() {
    let scheduler = Arc::new(CountingScheduler::default());
    let runtime = Runtime::new(scheduler.clone());
    let clock = runtime.frame_clock();

    let _registration = clock.with_frame_nanos(|_| {});
    assert_eq!(scheduler.frames.load(Ordering::SeqCst), 1);
}

#[test]
fn dropped_runtime_yields_inactive_registration() {
    let handle = {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        runtime.handle()
    };

    assert!(!handle.has_frame_callbacks());
    assert!(!handle.needs_frame());
    let registration = handle.frame_clock().with_frame_nanos(|_| {});
    assert!(!registration.is_active());
    assert_eq!(handle.register_frame_callback(|_| {}), None);
    handle.drain_frame_callbacks(1);
}

#[test]
fn std_clock_measures_elapsed_time() {
    let clock = StdClock;
    let start = clock.now();
    assert!(clock.elapsed_millis(start) < 60_000);
}
