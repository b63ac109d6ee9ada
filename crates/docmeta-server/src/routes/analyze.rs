//! Upload statistics.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::analytics::AnalyticsSummary;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/analyze", get(analyze))
}

/// GET /analyze — document types, readability buckets and common keywords.
async fn analyze(State(state): State<Arc<AppState>>) -> Json<AnalyticsSummary> {
    Json(state.analytics.read().summary())
}
