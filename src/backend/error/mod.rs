//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are used in services and HTTP handlers and can be converted
//! to HTTP responses.
//!
//! # Architecture
//!
//! - **`types`** - Error type definitions and constructors
//! - **`conversion`** - `IntoResponse` implementation
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use chatmates::backend::error::BackendError;
//!
//! async fn handler() -> Result<(), BackendError> {
//!     Err(BackendError::forbidden("You are not authorized to accept this request"))
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::{BackendError, INTERNAL_ERROR_MESSAGE};

/// Result alias used by services and handlers
pub type BackendResult<T> = Result<T, BackendError>;
