/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` holds only shared handles:
 * - the entity store behind the `SocialStore` trait object
 * - the validated application configuration
 *
 * Nothing in the state caches records; every request re-reads the store.
 */

use axum::extract::FromRef;
use std::sync::Arc;

use crate::backend::store::SocialStore;
use crate::shared::AppConfig;

/// Application state shared by every handler
///
/// # Usage
///
/// ```rust,no_run
/// use chatmates::backend::server::state::AppState;
/// use axum::extract::State;
///
/// async fn handler(State(app_state): State<AppState>) {
///     let secret = &app_state.config.jwt_secret;
///     // ...
/// }
/// ```
#[derive(Clone)]
pub struct AppState {
    /// Entity store (PostgreSQL or in-memory)
    pub store: Arc<dyn SocialStore>,

    /// Validated configuration (token secret, cookie policy, bcrypt cost)
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn SocialStore>, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

/// Allows handlers to extract `State<Arc<dyn SocialStore>>` directly
impl FromRef<AppState> for Arc<dyn SocialStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}

/// Allows handlers to extract `State<Arc<AppConfig>>` directly
impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
