/**
 * Error Conversion
 *
 * All backend errors implement `IntoResponse`, allowing handlers to return
 * them directly. Server errors are logged here, once, with their full cause.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "message": "Recipient not found",
 *   "status": 404
 * }
 * ```
 */

use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
    Json,
};
use crate::backend::error::types::BackendError;

/// Unreadable request bodies are client errors with the usual JSON shape
impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        BackendError::validation(rejection.body_text())
    }
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            match &self {
                BackendError::Store(err) if err.is_connection_lost() => {
                    tracing::warn!("Store connection lost while handling request: {}", err);
                }
                other => tracing::error!("Request failed: {}", other),
            }
        } else {
            tracing::debug!("Request rejected ({}): {}", status.as_u16(), self);
        }

        let body = serde_json::json!({
            "message": self.message(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}
