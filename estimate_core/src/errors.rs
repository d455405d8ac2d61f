//! # Error Types
//!
//! Structured error types for estimate_core. Every failure the intake form,
//! the webhook client or the renderer can hit maps to one variant, so the
//! front-ends can turn it into an inline message without string matching.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::errors::{EstimateError, EstimateResult};
//!
//! fn check_project_name(name: &str) -> EstimateResult<()> {
//!     if name.trim().is_empty() {
//!         return Err(EstimateError::missing_field("projectName"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_project_name("").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for estimate_core operations
pub type EstimateResult<T> = Result<T, EstimateError>;

/// Structured error type for estimation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum EstimateError {
    /// A required form field is empty
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A form value is outside its allowed range
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A submission is already in flight for this form
    #[error("An estimation request is already in progress")]
    AlreadySubmitting,

    /// The webhook could not be reached at all
    #[error("Network error: {reason}. Check if the estimation webhook is running.")]
    Transport { reason: String },

    /// The webhook answered with a non-success status
    #[error("Failed to get estimation: {status} - {body}")]
    Service { status: u16, body: String },

    /// No stored estimation response was found
    #[error("No estimation data found. Please submit the form first.")]
    NoData,

    /// The stored response could not be normalized into a report document
    #[error("Failed to parse estimation data: {reason}")]
    ParseFailure { reason: String },

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

    /// Configuration value is unusable
    #[error("Configuration error: {key} - {reason}")]
    Config { key: String, reason: String },
}

impl EstimateError {
    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        EstimateError::MissingField {
            field: field.into(),
        }
    }

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

    /// Create a Transport error
    pub fn transport(reason: impl Into<String>) -> Self {
        EstimateError::Transport {
            reason: reason.into(),
        }
    }

    /// Create a Service error
    pub fn service(status: u16, body: impl Into<String>) -> Self {
        EstimateError::Service {
            status,
            body: body.into(),
        }
    }

    /// Create a ParseFailure error
    pub fn parse_failure(reason: impl Into<String>) -> Self {
        EstimateError::ParseFailure {
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

    /// Create a Config error
    pub fn config(key: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimateError::Config {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Whether resubmitting the form can clear this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EstimateError::Transport { .. } | EstimateError::Service { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            EstimateError::MissingField { .. } => "MISSING_FIELD",
            EstimateError::InvalidInput { .. } => "INVALID_INPUT",
            EstimateError::AlreadySubmitting => "ALREADY_SUBMITTING",
            EstimateError::Transport { .. } => "TRANSPORT_FAILURE",
            EstimateError::Service { .. } => "SERVICE_FAILURE",
            EstimateError::NoData => "NO_DATA",
            EstimateError::ParseFailure { .. } => "PARSE_FAILURE",
            EstimateError::FileError { .. } => "FILE_ERROR",
            EstimateError::SerializationError { .. } => "SERIALIZATION_ERROR",
            EstimateError::Config { .. } => "CONFIG_ERROR",
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = EstimateError::service(500, "server error");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"Service\""));
        let roundtrip: EstimateError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        let missing = EstimateError::missing_field("projectName");
        assert_eq!(missing.error_code(), "MISSING_FIELD");
        assert_eq!(EstimateError::NoData.error_code(), "NO_DATA");
        assert_eq!(EstimateError::parse_failure("bad").error_code(), "PARSE_FAILURE");
    }

    #[test]
    fn test_service_message_carries_status_and_body() {
        let message = EstimateError::service(500, "server error").to_string();
        assert_eq!(message, "Failed to get estimation: 500 - server error");
    }

    #[test]
    fn test_recoverable_failures() {
        assert!(EstimateError::transport("connection refused").is_recoverable());
        assert!(EstimateError::service(502, "").is_recoverable());
        assert!(!EstimateError::NoData.is_recoverable());
        assert!(!EstimateError::missing_field("projectName").is_recoverable());
    }
}
