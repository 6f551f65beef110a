//! Dashboard route: runs the aggregation pipeline and returns the render
//! model. Every view-layer trigger (initial load, window refocus, manual
//! refresh) is a request here; there is no cross-request caching beyond
//! the last-good snapshot used on upstream failure.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::{ApiResponse, AppError};
use crate::services::dashboard::{self, DashboardModel};
use crate::services::timeline::TimeWindow;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DashboardParams {
    #[serde(default)]
    pub window: TimeWindow,
}

/// GET /api/v1/dashboard?window=7|30|all — aggregated dashboard model.
pub async fn get(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> Result<Json<ApiResponse<DashboardModel>>, AppError> {
    let model = dashboard::run(&state.upstream, &state.cache, params.window).await?;
    Ok(ApiResponse::success(model))
}
