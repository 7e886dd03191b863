//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the backend and any client of the REST API. All types are designed for
//! JSON serialization and carry no server-only dependencies.

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Friend graph and notification types
pub mod social;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
