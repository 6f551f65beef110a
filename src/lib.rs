pub mod config;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;
pub mod upstream;

use std::sync::Arc;

use crate::services::dashboard::SourceCache;
use crate::upstream::UpstreamClient;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
    pub cache: Arc<SourceCache>,
    pub config: config::AppConfig,
}

/// Build the full API router over the given state.
pub fn router(state: AppState) -> axum::Router {
    use axum::routing::get;
    use axum::Router;

    let api = Router::new().route("/dashboard", get(routes::dashboard::get));

    Router::new()
        .route("/health/live", get(routes::health::live))
        .route("/health/ready", get(routes::health::ready))
        .nest("/api/v1", api)
        .with_state(state)
}
