//! Request Extractors
//!
//! `ApiJson` behaves like `axum::Json` but rejects unreadable bodies (wrong
//! types, bad syntax, missing content type) with a `BackendError`, so clients
//! always receive the `{ message, status }` error body.

use axum::extract::FromRequest;

use crate::backend::error::BackendError;

/// JSON body extractor with `BackendError` rejections
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(BackendError))]
pub struct ApiJson<T>(pub T);
