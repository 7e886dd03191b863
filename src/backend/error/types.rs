/**
 * Backend Error Types
 *
 * This module defines the error taxonomy used by services and HTTP handlers.
 * Every variant maps onto one HTTP status code.
 *
 * # Error Categories
 *
 * ## Client Errors
 *
 * - Validation - self-references, blank or malformed input (400)
 * - Conflict - duplicate requests or relationships (400)
 * - NotFound - a referenced entity does not exist (404)
 * - Forbidden - the caller does not own the entity (403)
 * - Unauthenticated - missing, invalid or stale identity (401)
 *
 * ## Server Errors
 *
 * Store faults and anything else unanticipated are reported as a generic
 * "Internal Server Error"; the detailed cause only goes to the logs.
 */

use thiserror::Error;
use axum::http::StatusCode;
use crate::backend::store::StoreError;
use crate::shared::SharedError;

/// Generic body for every 5xx response
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use chatmates::backend::error::BackendError;
///
/// let err = BackendError::not_found("Recipient not found");
/// let err = BackendError::forbidden("You are not authorized to accept this request");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Invalid input, including self-referencing operations
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable error message
        message: String,
    },

    /// Duplicate request or relationship
    #[error("Conflict: {message}")]
    Conflict {
        /// Human-readable error message
        message: String,
    },

    /// Referenced entity does not exist
    #[error("Not found: {message}")]
    NotFound {
        /// Human-readable error message
        message: String,
    },

    /// Caller is authenticated but not allowed to act on the entity
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Human-readable error message
        message: String,
    },

    /// Missing or invalid identity
    #[error("Unauthenticated: {message}")]
    Unauthenticated {
        /// Human-readable error message
        message: String,
    },

    /// Store failure (connection loss, query error, broken invariant)
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Any other unanticipated failure (hashing, token signing)
    #[error("Internal error: {message}")]
    Internal {
        /// Detailed cause, logged but never returned
        message: String,
    },

    /// Shared error (from shared module)
    #[error(transparent)]
    SharedError(#[from] SharedError),
}

impl BackendError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// Conflicts are reported as 400, matching the public API contract.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::Conflict { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            Self::Store(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SharedError(SharedError::ValidationError { .. }) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the message returned to the client
    ///
    /// Server errors collapse to [`INTERNAL_ERROR_MESSAGE`].
    pub fn message(&self) -> String {
        if self.status_code().is_server_error() {
            return INTERNAL_ERROR_MESSAGE.to_string();
        }
        match self {
            Self::Validation { message }
            | Self::Conflict { message }
            | Self::NotFound { message }
            | Self::Forbidden { message }
            | Self::Unauthenticated { message } => message.clone(),
            Self::SharedError(err) => err.public_message(),
            other => other.to_string(),
        }
    }
}
