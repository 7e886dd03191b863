/**
 * Router Configuration
 *
 * Combines the API routes with the static presentation shell.
 *
 * # Route Order
 *
 * 1. API routes (accounts, friend graph, notifications)
 * 2. Unmatched paths under `/api/` answer with a JSON 404
 * 3. Everything else is served from the static directory, falling back to
 *    `index.html` so client-side routes resolve
 */

use axum::Router;
use std::path::PathBuf;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

pub fn create_router(app_state: AppState) -> Router<()> {
    let router = configure_api_routes(Router::new(), app_state.clone());

    let static_dir = PathBuf::from(&app_state.config.static_dir);
    let shell = ServeDir::new(&static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    router
        .fallback_service(shell)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
