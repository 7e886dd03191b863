//! Logout handler for POST /api/auth/logout

use axum::response::{IntoResponse, Json};
use axum_extra::extract::cookie::CookieJar;

use crate::backend::auth::handlers::types::LogoutResponse;
use crate::backend::auth::sessions::clear_session_cookie;

/// Clear the session cookie. Tokens are stateless, so nothing is revoked server-side.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (
        jar.remove(clear_session_cookie()),
        Json(LogoutResponse {
            success: true,
            message: "Logout successful".to_string(),
        }),
    )
}
