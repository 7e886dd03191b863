/**
 * Onboarding Handler
 *
 * POST /api/auth/onboarding completes the caller's profile. Onboarded users
 * become visible in other users' recommendations.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::UserEnvelope;
use crate::backend::extract::ApiJson;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::social::OnboardingProfile;

/// Onboarding handler
///
/// # Errors
///
/// * `400 Bad Request` - One or more profile fields blank (all are listed)
/// * `404 Not Found` - Caller's record disappeared
pub async fn onboard(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(profile): ApiJson<OnboardingProfile>,
) -> BackendResult<Json<UserEnvelope>> {
    let missing = profile.missing_fields();
    if !missing.is_empty() {
        return Err(BackendError::validation(format!(
            "All fields are required (missing: {})",
            missing.join(", ")
        )));
    }

    let updated = app_state
        .store
        .complete_onboarding(user.id, &profile)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    tracing::info!("User onboarded: {}", updated.id);

    Ok(Json(UserEnvelope {
        success: true,
        user: updated,
    }))
}
