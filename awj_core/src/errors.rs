//! # Error Types
//!
//! Structured error types for awj_core. These errors carry enough context
//! for a caller (UI handler, CLI, remote service) to report the problem
//! without parsing message strings.
//!
//! Note that an unknown material key is *not* an error for the engine: it
//! resolves to steel. [`CalcError::MaterialNotFound`] is only produced by
//! the strict [`MaterialType::from_key`](crate::materials::MaterialType::from_key).
//!
//! ## Example
//!
//! ```rust
//! use awj_core::errors::{CalcError, CalcResult};
//!
//! fn require_positive(thickness_mm: f64) -> CalcResult<()> {
//!     if thickness_mm <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "thickness_mm",
//!             thickness_mm.to_string(),
//!             "Thickness must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_positive(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::validation::Violation;

/// Result type alias for awj_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A single input value is invalid
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Input record failed parameter validation; all violations are listed
    #[error("Validation failed: {}", join_messages(.violations))]
    ValidationFailed { violations: Vec<Violation> },

    /// Material key is not in the material table (strict lookup only)
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// A derived quantity came out non-finite (division by zero, negative base, ...)
    #[error("Arithmetic domain error: {quantity} evaluated to {value}")]
    ArithmeticDomain { quantity: String, value: String },

    /// Batch request is malformed (no variations, too many, ...)
    #[error("Invalid batch request: {reason}")]
    InvalidBatch { reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

fn join_messages(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create an ArithmeticDomain error for a non-finite quantity
    pub fn arithmetic_domain(quantity: impl Into<String>, value: f64) -> Self {
        CalcError::ArithmeticDomain {
            quantity: quantity.into(),
            value: value.to_string(),
        }
    }

    /// Create an InvalidBatch error
    pub fn invalid_batch(reason: impl Into<String>) -> Self {
        CalcError::InvalidBatch {
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::ValidationFailed { .. } => "VALIDATION_FAILED",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::ArithmeticDomain { .. } => "ARITHMETIC_DOMAIN",
            CalcError::InvalidBatch { .. } => "INVALID_BATCH",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}
