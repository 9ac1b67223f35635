//! Error types for building and driving the lab simulation.

use std::fmt;

/// Errors raised when constructing or driving a [`Simulation`](crate::Simulation).
///
/// Per-tick operations never fail; these only surface at setup time or
/// when talking to a driver that has already shut down.
#[derive(Debug, Clone, PartialEq)]
pub enum LabError {
    /// The viewport cannot contain the body between its boundaries.
    ViewportTooSmall { width: f32, height: f32 },
    /// Configuration text could not be parsed.
    Config(String),
    /// A parameter code from the C API did not name a control.
    UnknownParam(u32),
    /// The tick driver has exited and no longer accepts commands.
    DriverStopped,
}

impl fmt::Display for LabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabError::ViewportTooSmall { width, height } => {
                write!(f, "viewport {}x{} is too small for the body", width, height)
            }
            LabError::Config(msg) => write!(f, "invalid configuration: {}", msg),
            LabError::UnknownParam(code) => write!(f, "unknown parameter code {}", code),
            LabError::DriverStopped => write!(f, "tick driver has stopped"),
        }
    }
}

impl std::error::Error for LabError {}

impl From<serde_json::Error> for LabError {
    fn from(err: serde_json::Error) -> Self {
        LabError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_viewport() {
        let err = LabError::ViewportTooSmall { width: 20.0, height: 40.0 };
        assert_eq!(err.to_string(), "viewport 20x40 is too small for the body");
    }

    #[test]
    fn json_errors_become_config_errors() {
        let err: LabError = serde_json::from_str::<f32>("nope").unwrap_err().into();
        assert!(matches!(err, LabError::Config(_)));
    }
}
