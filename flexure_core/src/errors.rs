//! # Error Types
//!
//! Structured error types for flexure_core. Every variant carries enough
//! context (which entity, which field, which computed value) for a caller to
//! present a precise diagnostic without parsing the message text.
//!
//! ## Example
//!
//! ```rust
//! use flexure_core::errors::{FlexureError, FlexureResult};
//!
//! fn validate_length(length: f64) -> FlexureResult<()> {
//!     if length <= 0.0 {
//!         return Err(FlexureError::validation(
//!             "beamLength",
//!             length.to_string(),
//!             "Beam length must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_length(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for flexure_core operations
pub type FlexureResult<T> = Result<T, FlexureError>;

/// Structured error type for beam analysis.
///
/// The engine never recovers from these itself: each one rejects the request
/// and leaves the decision to the caller.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum FlexureError {
    /// Malformed or physically invalid input, detected before any solving
    #[error("Invalid input for '{field}': {value} - {reason}")]
    Validation {
        field: String,
        value: String,
        reason: String,
    },

    /// Equation count does not match the number of unknown reaction components
    #[error(
        "Statically indeterminate or unstable: {unknowns} unknown reaction components \
         but {equations} equilibrium/release equations"
    )]
    Indeterminate { unknowns: usize, equations: usize },

    /// The assembled equilibrium system is numerically singular
    #[error(
        "Singular equilibrium system at unknown '{unknown}': pivot {pivot:e} is below \
         tolerance {tolerance:e}"
    )]
    SingularSystem {
        unknown: String,
        pivot: f64,
        tolerance: f64,
    },

    /// Internal forces were requested before a successful solve
    #[error("Model not solved - call solve() before requesting internal forces")]
    ModelNotSolved,

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl FlexureError {
    /// Create a Validation error
    pub fn validation(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        FlexureError::Validation {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a SingularSystem error
    pub fn singular(unknown: impl Into<String>, pivot: f64, tolerance: f64) -> Self {
        FlexureError::SingularSystem {
            unknown: unknown.into(),
            pivot,
            tolerance,
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        FlexureError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by the beam description itself rather than I/O.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            FlexureError::Validation { .. }
                | FlexureError::Indeterminate { .. }
                | FlexureError::SingularSystem { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            FlexureError::Validation { .. } => "VALIDATION_ERROR",
            FlexureError::Indeterminate { .. } => "INDETERMINACY_ERROR",
            FlexureError::SingularSystem { .. } => "SINGULAR_SYSTEM_ERROR",
            FlexureError::ModelNotSolved => "MODEL_NOT_SOLVED_ERROR",
            FlexureError::FileError { .. } => "FILE_ERROR",
            FlexureError::Serialization { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for FlexureError {
    fn from(e: serde_json::Error) -> Self {
        FlexureError::Serialization {
            reason: e.to_string(),
        }
    }
}
