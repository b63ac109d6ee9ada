use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let recognizer = state.generator.recognizer();
    Json(serde_json::json!({
        "status": "ok",
        "recognizer": recognizer.name(),
        "recognizerAvailable": recognizer.is_available(),
    }))
}
