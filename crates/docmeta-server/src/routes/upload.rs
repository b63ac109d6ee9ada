//! Document upload and metadata generation.

use std::sync::Arc;

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};

use docmeta_ingest::{is_allowed, FileType};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/upload", post(upload_file))
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}

fn multipart_error(e: MultipartError) -> Response {
    tracing::warn!("Rejected upload: {}", e);
    (e.status(), Json(serde_json::json!({ "error": e.body_text() }))).into_response()
}

/// POST /upload — store the file, extract its text and return its metadata.
async fn upload_file(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> Response {
    let mut upload = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some("file") {
                    continue;
                }
                let filename = field.file_name().unwrap_or("").to_string();
                match field.bytes().await {
                    Ok(bytes) => {
                        upload = Some((filename, bytes));
                        break;
                    }
                    Err(e) => return multipart_error(e),
                }
            }
            Ok(None) => break,
            Err(e) => return multipart_error(e),
        }
    }

    let Some((filename, bytes)) = upload else {
        return bad_request("No file part");
    };
    if filename.is_empty() {
        return bad_request("No selected file");
    }

    let original_filename = sanitize_filename(&filename);
    if !is_allowed(&original_filename) {
        return bad_request("File type not allowed");
    }
    let ext = match original_filename.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => return bad_request("File type not allowed"),
    };

    let stored_path = state
        .config
        .data_paths
        .uploads
        .join(format!("{}.{}", uuid::Uuid::new_v4(), ext));
    if let Err(e) = tokio::fs::write(&stored_path, &bytes).await {
        tracing::error!("Failed to store upload {}: {}", stored_path.display(), e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": format!("Write failed: {}", e) })),
        )
            .into_response();
    }
    tracing::info!(
        "Stored {} ({} bytes) as {}",
        original_filename,
        bytes.len(),
        stored_path.display()
    );

    // Extraction and NLP are CPU-bound.
    let worker = state.clone();
    let name = original_filename.clone();
    let file_ext = ext.clone();
    let processed = tokio::task::spawn_blocking(move || {
        let text = worker.extractor.extract_text(&stored_path, &file_ext);
        let analysis = worker.generator.analyze(&text, &name);
        (text, analysis)
    })
    .await;

    let (text, analysis) = match processed {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Metadata generation for {} failed: {}", original_filename, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Metadata generation failed" })),
            )
                .into_response();
        }
    };

    state
        .analytics
        .write()
        .record(FileType::from_extension(&ext), &text, &analysis.record);

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "original_filename": original_filename,
            "metadata": analysis.record,
        })),
    )
        .into_response()
}

/// Reduce a client-supplied name to a safe ASCII filename.
fn sanitize_filename(name: &str) -> String {
    // Take just the filename part
    let base = name.rsplit(|c| c == '/' || c == '\\').next().unwrap_or("");

    let joined = base.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    cleaned.trim_matches(|c| c == '.' || c == '_').to_string()
}
