//! Error types for the rally-ramp core.

use thiserror::Error;

/// Errors produced by ramp generation and contrast evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RampError {
    /// The ramp request has an invalid shape (step count, curve spec, rate).
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A hex color string could not be parsed where a fallback would corrupt output.
    #[error("invalid color: {0}")]
    InvalidColor(String),
}
