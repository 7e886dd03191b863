//! Backend Module
//!
//! This module contains all server-side code: an Axum HTTP server exposing
//! accounts, the friend graph and message notifications over a pluggable
//! entity store.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, store selection
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`middleware`** - Authentication guard and `AuthUser` extractor
//! - **`auth`** - JWT sessions and account handlers
//! - **`friends`** - Friend graph service and handlers
//! - **`notifications`** - Notification service and handlers
//! - **`store`** - `SocialStore` trait with PostgreSQL and in-memory implementations
//! - **`error`** - Backend-specific error types
//! - **`extract`** - JSON extractor rejecting with `BackendError`
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── middleware/     - Request middleware
//! ├── auth/           - Sessions and account handlers
//! ├── friends/        - Friend graph
//! ├── notifications/  - Message notifications
//! ├── store/          - Entity store
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` carries only the store handle and the configuration. Records
//! are re-read from the store on every request.

/// Server initialization and state management
pub mod server;

/// HTTP route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Entity store
pub mod store;

/// Request extractors
pub mod extract;

/// Authentication and account management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Friend graph
pub mod friends;

/// Message notifications
pub mod notifications;

pub use error::BackendError;
pub use server::create_app;
