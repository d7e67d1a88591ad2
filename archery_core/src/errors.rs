//! # Error Types
//!
//! Structured error types for archery_core. The tuning formulas themselves
//! are total and never fail; errors come from input validation, reference
//! data lookups, and the configuration store.
//!
//! ## Example
//!
//! ```rust
//! use archery_core::errors::{CalcError, CalcResult};
//!
//! fn validate_draw_weight(draw_weight_lb: f64) -> CalcResult<()> {
//!     if draw_weight_lb <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "draw_weight".to_string(),
//!             value: draw_weight_lb.to_string(),
//!             reason: "Draw weight must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for archery_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for tuning and storage operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, non-finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing from a configuration draft
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// No shaft in the reference table matches the request
    #[error("Shaft not found: {query}")]
    ShaftNotFound { query: String },

    /// An embedded reference table failed to parse
    #[error("Reference data error in '{table}': {reason}")]
    ReferenceData { table: String, reason: String },

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

    /// Store schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
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

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a ShaftNotFound error
    pub fn shaft_not_found(query: impl Into<String>) -> Self {
        CalcError::ShaftNotFound {
            query: query.into(),
        }
    }

    /// Create a ReferenceData error
    pub fn reference_data(table: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::ReferenceData {
            table: table.into(),
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

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::ShaftNotFound { .. } => "SHAFT_NOT_FOUND",
            CalcError::ReferenceData { .. } => "REFERENCE_DATA",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("draw_weight", "0", "Draw weight must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("name").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::shaft_not_found("spine 340").error_code(), "SHAFT_NOT_FOUND");
        assert_eq!(CalcError::serialization("bad json").error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_error_display() {
        let error = CalcError::file_error("open", "/tmp/store.json", "No such file");
        assert_eq!(
            error.to_string(),
            "File error: open on '/tmp/store.json' - No such file"
        );
    }
}
