/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /api/auth/login.
 *
 * # Security
 *
 * - Unknown email and wrong password produce the same 401
 * - Passwords are never logged or returned in responses
 */

use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use axum_extra::extract::cookie::CookieJar;

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::sessions::{create_token, session_cookie};
use crate::backend::extract::ApiJson;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::server::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - Email or password missing
/// * `401 Unauthorized` - Unknown email or wrong password
/// * `500 Internal Server Error` - Store or token failure
pub async fn login(
    State(app_state): State<AppState>,
    jar: CookieJar,
    ApiJson(request): ApiJson<LoginRequest>,
) -> BackendResult<impl IntoResponse> {
    let email = request.email.trim().to_lowercase();
    if email.is_empty() || request.password.is_empty() {
        return Err(BackendError::validation("All fields are required"));
    }

    tracing::info!("Login request for: {}", email);

    let credentials = app_state
        .store
        .find_credentials_by_email(&email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", email);
            BackendError::unauthenticated(INVALID_CREDENTIALS)
        })?;

    let valid = bcrypt::verify(&request.password, &credentials.password_hash).map_err(|e| {
        tracing::error!("Password verification error: {:?}", e);
        BackendError::internal("Password verification failed")
    })?;

    if !valid {
        tracing::warn!("Invalid password for user: {}", email);
        return Err(BackendError::unauthenticated(INVALID_CREDENTIALS));
    }

    let user = credentials.user;
    let token = create_token(
        &app_state.config.jwt_secret,
        app_state.config.token_ttl_secs(),
        user.id,
        &user.email,
    )
    .map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        BackendError::internal("Failed to create token")
    })?;

    let cookie = session_cookie(
        token.clone(),
        app_state.config.token_ttl_secs(),
        app_state.config.production,
    );

    tracing::info!("User logged in successfully: {} ({})", user.full_name, user.email);

    Ok((
        jar.add(cookie),
        Json(AuthResponse {
            success: true,
            user,
            token,
        }),
    ))
}
