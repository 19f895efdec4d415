//! # Error Types
//!
//! Structured error types for floor_core. The estimator itself cannot fail;
//! these errors only surface at the edges: loading a rate table, validating
//! contact details, or parsing a questionnaire answer.
//!
//! ## Example
//!
//! ```rust
//! use floor_core::errors::{EstimateError, EstimateResult};
//!
//! fn validate_multiplier(multiplier: f64) -> EstimateResult<()> {
//!     if multiplier <= 1.0 {
//!         return Err(EstimateError::invalid_config(
//!             "wastage_multiplier",
//!             multiplier.to_string(),
//!             "Wastage multiplier must be greater than 1.0",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_multiplier(0.9).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for floor_core operations
pub type EstimateResult<T> = Result<T, EstimateError>;

/// Structured error type for everything around the estimator.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum EstimateError {
    /// A questionnaire value could not be parsed or is out of range
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required contact field is empty
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// The rate table breaks one of its invariants
    #[error("Invalid config '{field}': {value} - {reason}")]
    InvalidConfig {
        field: String,
        value: String,
        reason: String,
    },

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

impl EstimateError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        EstimateError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        EstimateError::MissingField {
            field: field.into(),
        }
    }

    /// Create an InvalidConfig error
    pub fn invalid_config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        EstimateError::InvalidConfig {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        EstimateError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            EstimateError::InvalidInput { .. } => "INVALID_INPUT",
            EstimateError::MissingField { .. } => "MISSING_FIELD",
            EstimateError::InvalidConfig { .. } => "INVALID_CONFIG",
            EstimateError::FileError { .. } => "FILE_ERROR",
            EstimateError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for EstimateError {
    fn from(e: serde_json::Error) -> Self {
        EstimateError::SerializationError {
            reason: e.to_string(),
        }
    }
}
