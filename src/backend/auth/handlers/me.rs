/**
 * Get Current User Handler
 *
 * GET /api/auth/me returns the caller resolved by the auth middleware.
 * The record is loaded fresh on every request, so friend lists and
 * onboarding state are current.
 */

use axum::response::Json;

use crate::backend::auth::handlers::types::UserEnvelope;
use crate::backend::middleware::AuthUser;

pub async fn get_me(AuthUser(user): AuthUser) -> Json<UserEnvelope> {
    Json(UserEnvelope {
        success: true,
        user,
    })
}
