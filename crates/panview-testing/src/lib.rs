//! Testing utilities and harness for PanView

pub mod assertions;
pub mod doubles;
pub mod rule;

pub use assertions::{assert_monotonic, assert_offset_in_bounds};
pub use doubles::{PanEvent, RecordingListener, SharedBounds, TestSurface};
pub use rule::{PanTestRule, FRAME_NANOS};

pub mod prelude {
    pub use crate::assertions::*;
    pub use crate::doubles::*;
    pub use crate::rule::*;
}
