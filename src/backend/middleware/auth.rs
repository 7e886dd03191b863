/**
 * Authentication Middleware
 *
 * This module protects routes that require an authenticated caller. It reads
 * the session token from the `jwt` cookie (or an `Authorization: Bearer`
 * header), verifies it, loads the user and attaches it to the request.
 * Handlers receive the caller explicitly through the `AuthUser` extractor.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::backend::auth::sessions::{verify_token, SESSION_COOKIE};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::server::state::AppState;
use crate::shared::social::User;

/// Authenticated caller, as resolved by [`auth_middleware`]
#[derive(Clone, Debug)]
pub struct AuthUser(pub User);

/// Read the session token, preferring the cookie over the header
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let from_cookie = CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty());

    from_cookie.or_else(|| {
        headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
    })
}

/// Resolve the request's token to a stored user
///
/// Auth failures are 401s; store faults propagate as 500s.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> BackendResult<User> {
    let token = extract_token(headers).ok_or_else(|| {
        tracing::debug!("Request without session token");
        BackendError::unauthenticated("Unauthorized - No token provided")
    })?;

    let claims = verify_token(&state.config.jwt_secret, &token).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        BackendError::unauthenticated("Unauthorized - Invalid token")
    })?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|e| {
        tracing::warn!("Invalid user ID in token: {:?}", e);
        BackendError::unauthenticated("Unauthorized - Invalid token")
    })?;

    state.store.find_user(user_id).await?.ok_or_else(|| {
        tracing::warn!("Token subject {} has no user record", user_id);
        BackendError::unauthenticated("Unauthorized - User not found")
    })
}

/// Authentication middleware
///
/// Returns 401 when the token is missing, invalid, or names an unknown user.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let user = authenticate(&app_state, request.headers()).await?;
    request.extensions_mut().insert(AuthUser(user));
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthUser>().cloned().ok_or_else(|| {
            tracing::warn!("AuthUser not found in request extensions");
            BackendError::unauthenticated("Unauthorized - No token provided")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::sessions::create_token;
    use crate::backend::store::{MemoryStore, SocialStore};
    use crate::shared::social::NewUser;
    use crate::shared::AppConfig;
    use assert_matches::assert_matches;
    use axum::http::{header::COOKIE, HeaderValue};
    use std::sync::Arc;

    fn state() -> (AppState, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let config = AppConfig::builder().bcrypt_cost(4).build().unwrap();
        (AppState::new(store.clone(), config), store)
    }

    fn token_for(state: &AppState, user_id: Uuid) -> String {
        create_token(
            &state.config.jwt_secret,
            state.config.token_ttl_secs(),
            user_id,
            "someone@example.com",
        )
        .unwrap()
    }

    #[test]
    fn test_extract_token_prefers_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; jwt=from-cookie"));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        assert_eq!(extract_token(&headers).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn test_extract_token_falls_back_to_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("jwt="));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        assert_eq!(extract_token(&headers).as_deref(), Some("from-header"));

        assert!(extract_token(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_extract_token_across_cookie_headers() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(COOKIE, HeaderValue::from_static("lang=en; jwt=second-header"));
        assert_eq!(extract_token(&headers).as_deref(), Some("second-header"));
    }

    #[tokio::test]
    async fn test_authenticate_missing_token() {
        let (state, _) = state();
        let err = authenticate(&state, &HeaderMap::new()).await.unwrap_err();
        assert_matches!(err, BackendError::Unauthenticated { message } if message == "Unauthorized - No token provided");
    }

    #[tokio::test]
    async fn test_authenticate_invalid_token() {
        let (state, _) = state();
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer not.a.token"));
        let err = authenticate(&state, &headers).await.unwrap_err();
        assert_matches!(err, BackendError::Unauthenticated { message } if message == "Unauthorized - Invalid token");
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user() {
        let (state, _) = state();
        let token = token_for(&state, Uuid::new_v4());
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, format!("Bearer {}", token).parse().unwrap());
        let err = authenticate(&state, &headers).await.unwrap_err();
        assert_matches!(err, BackendError::Unauthenticated { message } if message == "Unauthorized - User not found");
    }

    #[tokio::test]
    async fn test_authenticate_resolves_user() {
        let (state, store) = state();
        let user = store
            .create_user(NewUser {
                full_name: "Test".to_string(),
                email: "test@example.com".to_string(),
                password_hash: "hash".to_string(),
                profile_pic: String::new(),
            })
            .await
            .unwrap();
        let token = token_for(&state, user.id);
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, format!("jwt={}", token).parse().unwrap());

        let resolved = authenticate(&state, &headers).await.unwrap();
        assert_eq!(resolved.id, user.id);
    }
}
