//! Error types for the divider calculator.
//!
//! Every variant of [`DivcalcError`] is a configuration error: it is raised
//! while validating parameters, before any search starts. A sub-problem that
//! finds no matching resistor combination is not an error, it simply returns
//! an empty candidate list.

use thiserror::Error;

/// Result type alias using [`DivcalcError`].
pub type Result<T> = std::result::Result<T, DivcalcError>;

/// Unified error type for all divcalc operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DivcalcError {
    // ============ Series Errors ============
    /// Decade range is reversed or out of the supported span
    #[error("Invalid decade range {min}..{max}: {message}")]
    InvalidDecadeRange { min: i32, max: i32, message: String },

    /// Series name not recognized
    #[error("Unknown resistor series '{name}' (expected E24 or E96)")]
    UnknownSeries { name: String },

    // ============ Constraint Errors ============
    /// Tolerance outside (0, 1)
    #[error("Invalid tolerance {value}: must be a fraction between 0 and 1 (exclusive)")]
    InvalidTolerance { value: f64 },

    /// Invalid search constraint
    #[error("Invalid constraint '{name}': {message}")]
    InvalidConstraint { name: String, message: String },

    /// Invalid bandgap reference description
    #[error("Invalid reference voltage: {message}")]
    InvalidReference { message: String },

    // ============ Target Errors ============
    /// Target outside the datasheet window or in conflict with another target
    #[error("Invalid {name} target {value:.3} V: {message}")]
    InvalidTarget {
        name: String,
        value: f64,
        message: String,
    },

    /// A required companion target was not given
    #[error("Missing target: {message}")]
    MissingTarget { message: String },
}

impl DivcalcError {
    /// Create an invalid decade range error
    pub fn decade_range(min: i32, max: i32, message: impl Into<String>) -> Self {
        Self::InvalidDecadeRange {
            min,
            max,
            message: message.into(),
        }
    }

    /// Create an invalid constraint error
    pub fn constraint(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConstraint {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an invalid target error
    pub fn target(name: impl Into<String>, value: f64, message: impl Into<String>) -> Self {
        Self::InvalidTarget {
            name: name.into(),
            value,
            message: message.into(),
        }
    }

    /// Create a missing target error
    pub fn missing(message: impl Into<String>) -> Self {
        Self::MissingTarget {
            message: message.into(),
        }
    }
}
