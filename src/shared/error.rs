//! Shared Error Types
//!
//! This module defines error types that are shared between the backend and any
//! client consuming the API types. They describe input problems that can be
//! detected without touching the store.
//!
//! # Error Categories
//!
//! - `ValidationError` - Data validation failures (blank fields, bad ids, self-references)
//!
//! # Usage
//!
//! ```rust
//! use chatmates::shared::error::SharedError;
//!
//! let error = SharedError::validation("recipientId", "Invalid user id");
//! ```
use thiserror::Error;

/// Shared error types that can occur on both sides of the API
#[derive(Debug, Error, Clone)]
pub enum SharedError {
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
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Message suitable for an API response body
    pub fn public_message(&self) -> String {
        match self {
            Self::ValidationError { message, .. } => message.clone(),
        }
    }
}

/// Parse a path or body identifier into a UUID
///
/// Malformed ids are reported as validation errors rather than reaching the store.
pub fn parse_id(field: &str, raw: &str) -> Result<uuid::Uuid, SharedError> {
    uuid::Uuid::parse_str(raw.trim())
        .map_err(|_| SharedError::validation(field, format!("Invalid {}", field)))
}
