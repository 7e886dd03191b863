/**
 * Server Initialization
 *
 * Builds the application state from configuration and hands it to the
 * router. There is no state to restore and no background work: every
 * request reads the store directly.
 */

use axum::Router;
use std::sync::Arc;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_store;
use crate::backend::server::state::AppState;
use crate::backend::store::SocialStore;
use crate::shared::AppConfig;

/// Create the application with the store selected by `config`
pub async fn create_app(config: AppConfig) -> Router<()> {
    tracing::info!("Initializing chatmates backend server");

    let store = load_store(&config).await;
    create_app_with_store(store, config)
}

/// Create the application on an already-built store
pub fn create_app_with_store(store: Arc<dyn SocialStore>, config: AppConfig) -> Router<()> {
    let app = create_router(AppState::new(store, config));
    tracing::info!("Router configured");
    app
}
