//! Routes Module
//!
//! - **`router`** - Main router assembly (API, static shell, tracing layer)
//! - **`api_routes`** - `/api/auth/*` and `/api/users/*` route table

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

pub use router::create_router;
