//! Service descriptor.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use docmeta_ingest::ALLOWED_EXTENSIONS;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/", get(index))
}

/// GET / — what this service is and how to call it.
async fn index(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "docmeta",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "POST /upload": "Upload a document (multipart field 'file') and get its metadata",
            "GET /analyze": "Statistics over documents processed since startup",
            "GET /health": "Service and recognizer status",
        },
        "allowedExtensions": ALLOWED_EXTENSIONS,
        "maxUploadBytes": state.config.max_upload_bytes,
    }))
}
