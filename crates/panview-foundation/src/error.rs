use std::fmt;

/// Wiring and configuration failures.
///
/// Gesture handling and pan commands never fail with an error; they report
/// "did not apply" through their `bool` results instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanError {
    /// A listener was already installed on this controller.
    ListenerAlreadySet,
    /// A [`PanConfig`](crate::PanConfig) value is out of range.
    InvalidConfig { reason: &'static str },
}

impl fmt::Display for PanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanError::ListenerAlreadySet => write!(f, "pan listener already set"),
            PanError::InvalidConfig { reason } => write!(f, "invalid pan config: {reason}"),
        }
    }
}

impl std::error::Error for PanError {}
