//! Middleware Module
//!
//! HTTP middleware for the backend server.
//!
//! - **`auth`** - Authentication middleware and the `AuthUser` extractor
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware, Router};
//! use chatmates::backend::middleware::auth_middleware;
//! use chatmates::backend::server::state::AppState;
//!
//! fn protect(router: Router<AppState>, state: AppState) -> Router<AppState> {
//!     router.route_layer(middleware::from_fn_with_state(state, auth_middleware))
//! }
//! ```

pub mod auth;

pub use auth::{auth_middleware, authenticate, extract_token, AuthUser};
