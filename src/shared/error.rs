//! Shared Error Types
//!
//! This module defines error types that are shared between the wire types
//! and the backend. They cover failures that can be detected without touching
//! the store: malformed payloads and missing or invalid fields.
//!
//! # Error Categories
//!
//! - `SerializationError` - JSON serialization/deserialization failures
//! - `ValidationError` - Data validation failures (rejected before any store access)
//!
//! # Usage
//!
//! ```rust
//! use taskboard::shared::error::SharedError;
//!
//! let error = SharedError::validation("title", "Title is required.");
//! ```
use thiserror::Error;

/// Shared error types that can occur while decoding or validating requests
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

/// Reject an empty or whitespace-only string field
pub fn require_text(field: &str, value: &str) -> Result<(), SharedError> {
    if value.trim().is_empty() {
        return Err(SharedError::validation(field, format!("{} is required.", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text() {
        assert!(require_text("title", "Backlog").is_ok());
        assert_eq!(
            require_text("title", "   "),
            Err(SharedError::validation("title", "title is required."))
        );
    }

    #[test]
    fn test_validation_display_names_field() {
        let error = SharedError::validation("dueDate", "dueDate is required.");
        assert_eq!(error.to_string(), "Validation error in field 'dueDate': dueDate is required.");
    }

    #[test]
    fn test_bad_payload_becomes_serialization_error() {
        let result: Result<serde_json::Value, _> = serde_json::from_str("{\"title\": }");
        let error: SharedError = result.unwrap_err().into();
        assert!(matches!(error, SharedError::SerializationError { ref message } if message.starts_with("JSON error")));
    }
}
