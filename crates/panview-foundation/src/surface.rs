//! Capabilities the host hands to a [`PanController`](crate::PanController).

/// Source of the maximum horizontal travel.
///
/// Queried on every use and never cached, so a surface that is re-measured
/// can report a new bound at any time. Values below zero are treated as zero.
pub trait PanBounds {
    fn max_pan(&self) -> i32;
}

impl<F> PanBounds for F
where
    F: Fn() -> i32,
{
    fn max_pan(&self) -> i32 {
        self()
    }
}

/// The scrollable surface being panned.
///
/// Offsets live in `[-max_pan, 0]`: `0` is fully open and `-max_pan` fully
/// panned. `scroll_by` does no bounds checking of its own; every delta the
/// controller hands it is already clamped.
pub trait PanSurface {
    /// Current horizontal offset.
    fn offset(&self) -> i32;

    /// Shifts the horizontal offset by `dx`.
    fn scroll_by(&self, dx: i32);

    /// Measured `(width, height)`; zero in either dimension means the surface
    /// has not been laid out yet.
    fn measured_size(&self) -> (i32, i32);
}

/// Lifecycle notifications from a [`PanController`](crate::PanController).
pub trait PanListener {
    /// A pointer went down on the surface.
    fn on_pan_start(&self) {}

    /// A snap animation ran to completion. Not fired for stopped animations.
    fn on_pan_end(&self) {}
}
