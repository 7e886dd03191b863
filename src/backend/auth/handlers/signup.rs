/**
 * Signup Handler
 *
 * This module implements the user registration handler for POST /api/auth/signup.
 *
 * # Registration Process
 *
 * 1. Validate required fields, password length and email shape
 * 2. Check if the email is already registered
 * 3. Hash password using bcrypt
 * 4. Create user with a generated avatar
 * 5. Generate JWT token and install the session cookie
 */

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::backend::auth::handlers::types::{
    avatar_url, is_valid_email, AuthResponse, SignupRequest, MIN_PASSWORD_LEN,
};
use crate::backend::auth::sessions::{create_token, session_cookie};
use crate::backend::extract::ApiJson;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::server::state::AppState;
use crate::backend::store::StoreError;
use crate::shared::social::NewUser;

/// Sign up handler
///
/// # Errors
///
/// * `400 Bad Request` - Missing fields, short password, malformed or taken email
/// * `500 Internal Server Error` - Hashing, token or store failure
pub async fn signup(
    State(app_state): State<AppState>,
    jar: CookieJar,
    ApiJson(request): ApiJson<SignupRequest>,
) -> BackendResult<impl IntoResponse> {
    let full_name = request.full_name.trim().to_string();
    let email = request.email.trim().to_lowercase();

    if full_name.is_empty() || email.is_empty() || request.password.is_empty() {
        return Err(BackendError::validation("All fields are required"));
    }
    if request.password.len() < MIN_PASSWORD_LEN {
        return Err(BackendError::validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    if !is_valid_email(&email) {
        return Err(BackendError::validation("Invalid email format"));
    }

    tracing::info!("Signup request for: {}", email);

    if app_state.store.find_credentials_by_email(&email).await?.is_some() {
        tracing::warn!("Signup with registered email: {}", email);
        return Err(BackendError::validation(
            "Email already exists, please use a different one",
        ));
    }

    let password_hash = bcrypt::hash(&request.password, app_state.config.bcrypt_cost).map_err(|e| {
        tracing::error!("Failed to hash password: {:?}", e);
        BackendError::internal("Failed to hash password")
    })?;

    let new_user = NewUser {
        full_name,
        email,
        password_hash,
        profile_pic: avatar_url(Uuid::new_v4()),
    };

    let user = match app_state.store.create_user(new_user).await {
        Ok(user) => user,
        Err(StoreError::Duplicate(_)) => {
            return Err(BackendError::validation(
                "Email already exists, please use a different one",
            ));
        }
        Err(e) => return Err(e.into()),
    };

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

    tracing::info!("User created successfully: {} ({})", user.full_name, user.id);

    Ok((
        StatusCode::CREATED,
        jar.add(cookie),
        Json(AuthResponse {
            success: true,
            user,
            token,
        }),
    ))
}
