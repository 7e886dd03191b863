//! Chatmates
//!
//! Backend for a language-exchange chat app: accounts, a friend graph with
//! request/accept semantics and message notifications.
//!
//! - **`shared`** - Wire types, configuration and shared errors (always compiled)
//! - **`backend`** - Axum server, store and services (`ssr` feature)

pub mod shared;

#[cfg(feature = "ssr")]
pub mod backend;
