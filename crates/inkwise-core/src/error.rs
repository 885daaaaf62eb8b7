//! Error and warning types shared across the recognizer.

use crate::gesture::GestureState;
use thiserror::Error;

/// Errors raised by the gesture state machine.
///
/// These are contract violations by the caller (for example confirming a
/// gesture while nothing is pending) and must be propagated, not ignored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GestureError {
    #[error("Invalid gesture transition: {operation} while {state}")]
    InvalidTransition {
        operation: &'static str,
        state: GestureState,
    },
}

/// Result type for gesture state machine operations.
pub type GestureResult<T> = Result<T, GestureError>;

/// Errors raised while building a stroke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrokeError {
    #[error("Attribute table has {attributes} entries for {points} points")]
    AttributeMismatch { points: usize, attributes: usize },
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} out of range: {value} not in [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Non-fatal conditions reported alongside a segmentation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SegmentationWarning {
    /// The stroke had too few points to segment.
    #[error("Stroke has {points} points, at least 2 are needed")]
    InsufficientData { points: usize },
    /// The round cap was reached while some grower could still expand.
    #[error("Segment growth did not converge within {rounds} rounds")]
    NoConvergence { rounds: usize },
}
