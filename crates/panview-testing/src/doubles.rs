//! In-memory stand-ins for the collaborators a `PanController` needs.

use panview_foundation::{PanBounds, PanListener, PanSurface};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Surface that stores its offset in memory and logs every `scroll_by`.
#[derive(Debug)]
pub struct TestSurface {
    offset: Cell<i32>,
    size: Cell<(i32, i32)>,
    scrolls: RefCell<Vec<i32>>,
}

impl TestSurface {
    /// A measured surface at offset 0.
    pub fn new() -> Self {
        Self::with_size(1080, 1920)
    }

    pub fn with_size(width: i32, height: i32) -> Self {
        Self {
            offset: Cell::new(0),
            size: Cell::new((width, height)),
            scrolls: RefCell::new(Vec::new()),
        }
    }

    /// A surface that has not been laid out yet.
    pub fn unmeasured() -> Self {
        Self::with_size(0, 0)
    }

    /// Moves the surface without going through `scroll_by`.
    pub fn set_offset(&self, offset: i32) {
        self.offset.set(offset);
    }

    pub fn set_measured_size(&self, width: i32, height: i32) {
        self.size.set((width, height));
    }

    /// Every delta passed to `scroll_by`, in order.
    pub fn scroll_log(&self) -> Vec<i32> {
        self.scrolls.borrow().clone()
    }

    pub fn clear_scroll_log(&self) {
        self.scrolls.borrow_mut().clear();
    }
}

impl Default for TestSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl PanSurface for TestSurface {
    fn offset(&self) -> i32 {
        self.offset.get()
    }

    fn scroll_by(&self, dx: i32) {
        self.scrolls.borrow_mut().push(dx);
        self.offset.set(self.offset.get() + dx);
    }

    fn measured_size(&self) -> (i32, i32) {
        self.size.get()
    }
}

/// Bounds whose value the test can change between queries.
#[derive(Clone, Debug, Default)]
pub struct SharedBounds {
    max_pan: Rc<Cell<i32>>,
    queries: Rc<Cell<usize>>,
}

impl SharedBounds {
    pub fn new(max_pan: i32) -> Self {
        Self {
            max_pan: Rc::new(Cell::new(max_pan)),
            queries: Rc::new(Cell::new(0)),
        }
    }

    pub fn set(&self, max_pan: i32) {
        self.max_pan.set(max_pan);
    }

    pub fn get(&self) -> i32 {
        self.max_pan.get()
    }

    /// How many times the controller asked for the bound.
    pub fn query_count(&self) -> usize {
        self.queries.get()
    }
}

impl PanBounds for SharedBounds {
    fn max_pan(&self) -> i32 {
        self.queries.set(self.queries.get() + 1);
        self.max_pan.get()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanEvent {
    Start,
    End,
}

/// Listener that records notifications in arrival order.
#[derive(Debug, Default)]
pub struct RecordingListener {
    events: RefCell<Vec<PanEvent>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PanEvent> {
        self.events.borrow().clone()
    }

    pub fn count(&self, event: PanEvent) -> usize {
        self.events.borrow().iter().filter(|e| **e == event).count()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl PanListener for RecordingListener {
    fn on_pan_start(&self) {
        self.events.borrow_mut().push(PanEvent::Start);
    }

    fn on_pan_end(&self) {
        self.events.borrow_mut().push(PanEvent::End);
    }
}
