//! Router-level tests: requests go through the full axum stack in memory
//! (no listening socket) and response shapes are checked.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use docmeta_core::DocMetaConfig;
use docmeta_server::{build_router, AppState};

const BOUNDARY: &str = "docmeta-test-boundary";

fn test_app(dir: &tempfile::TempDir, max_upload_mb: Option<&str>) -> Router {
    let limit = max_upload_mb.map(str::to_string);
    let config = DocMetaConfig::from_lookup(dir.path(), move |key| match key {
        "DOCMETA_MAX_UPLOAD_MB" => limit.clone(),
        _ => None,
    })
    .unwrap();
    build_router(Arc::new(AppState::new(config)))
}

fn multipart_body(field: &str, filename: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn upload_request(field: &str, filename: &str, content: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(field, filename, content)))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_index_descriptor() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir, None);
    let (status, json) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "docmeta");
    assert!(json["allowedExtensions"]
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e == "docx"));
}

#[tokio::test]
async fn test_health() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir, None);
    let (status, json) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["recognizer"], "pattern");
    assert_eq!(json["recognizerAvailable"], true);
}

#[tokio::test]
async fn test_upload_text_document() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir, None);
    let content = b"Quarterly Review\nRevenue grew in Berlin and Paris. Costs fell. Margins improved.";
    let (status, json) = send(&app, upload_request("file", "My Review.txt", content)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["original_filename"], "My_Review.txt");

    let metadata = &json["metadata"];
    assert_eq!(metadata["title"], "Quarterly Review");
    assert_eq!(metadata["filename"], "My_Review.txt");
    assert_eq!(metadata["language"], "English");
    assert!(metadata["word_count"].as_u64().unwrap() > 0);
    assert!(metadata["keywords"].is_array());
    let gpe = metadata["entities"]["GPE"].as_array().unwrap();
    assert!(gpe.iter().any(|e| e == "Berlin"));

    let stored: Vec<_> = std::fs::read_dir(dir.path().join("uploads"))
        .unwrap()
        .filter_map(|e| e.ok())
        .collect();
    assert_eq!(stored.len(), 1);
    let stored_name = stored[0].file_name().to_string_lossy().to_string();
    assert!(stored_name.ends_with(".txt"));
    assert_ne!(stored_name, "My_Review.txt");
}

#[tokio::test]
async fn test_upload_empty_text_document() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir, None);
    let (status, json) = send(&app, upload_request("file", "blank.txt", b"   \n ")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["metadata"]["summary"], "Empty document");
    assert_eq!(json["metadata"]["title"], "blank.txt");
    assert_eq!(json["metadata"]["language"], "unknown");
    assert_eq!(json["metadata"]["word_count"], 0);
}

#[tokio::test]
async fn test_upload_legacy_doc_is_accepted_with_empty_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir, None);
    let (status, json) = send(&app, upload_request("file", "old.doc", b"\xd0\xcf\x11\xe0")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["metadata"]["summary"], "Empty document");
}

#[tokio::test]
async fn test_upload_rejections() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir, None);

    let (status, json) = send(&app, upload_request("attachment", "a.txt", b"hi")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "No file part");

    let (status, json) = send(&app, upload_request("file", "", b"hi")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "No selected file");

    let (status, json) = send(&app, upload_request("file", "tool.exe", b"MZ")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "File type not allowed");

    let (status, json) = send(&app, upload_request("file", "noextension", b"hi")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "File type not allowed");
}

#[tokio::test]
async fn test_upload_over_body_limit() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir, Some("1"));
    let content = vec![b'a'; 2 * 1024 * 1024];
    let (status, _) = send(&app, upload_request("file", "big.txt", &content)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_analyze_counts_uploads() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir, None);

    let (_, empty) = send(&app, get("/analyze")).await;
    assert_eq!(empty["totalDocuments"], 0);
    assert_eq!(empty["documentTypes"]["PDF"], 0);

    let content = b"Budget notes. The budget was approved and the budget owner signed.";
    send(&app, upload_request("file", "a.txt", content)).await;
    send(&app, upload_request("file", "b.txt", content)).await;

    let (status, json) = send(&app, get("/analyze")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["totalDocuments"], 2);
    assert_eq!(json["uniqueDocuments"], 1);
    assert_eq!(json["documentTypes"]["TXT"], 2);
    assert_eq!(json["commonKeywords"][0]["keyword"], "budget");
    assert_eq!(json["commonKeywords"][0]["count"], 2);

    let buckets = json["readabilityScores"].as_object().unwrap();
    let total: u64 = buckets.values().map(|v| v.as_u64().unwrap()).sum();
    assert_eq!(total, 2);
}
