//! HTTP uploader and submitter against a local axum server

use axum::{
    body::Bytes,
    extract::Path,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{post, put},
    Json, Router,
};
use pagecraft_editor::{
    HttpSubmitter, HttpUploader, ImageFile, ImageUploader, StoredPage, SubmitError, Submitter,
    UploadError, CSRF_HEADER,
};
use serde_json::{json, Value};

const TOKEN: &str = "test-token";

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn has_token(headers: &HeaderMap) -> bool {
    headers
        .get(CSRF_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == TOKEN)
        .unwrap_or(false)
}

async fn upload(headers: HeaderMap, body: Bytes) -> Response {
    if !has_token(&headers) {
        return (StatusCode::from_u16(419).unwrap(), "CSRF token mismatch").into_response();
    }

    let is_multipart = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("multipart/form-data"))
        .unwrap_or(false);
    let body = String::from_utf8_lossy(&body);
    if !is_multipart || !body.contains(r#"name="file""#) || !body.contains("image/png") {
        return (StatusCode::BAD_REQUEST, "no file").into_response();
    }

    if body.contains(r#"filename="empty.png""#) {
        return Json(json!({ "path": "/img/empty.png" })).into_response();
    }

    Json(json!({ "url": "/img/x.png" })).into_response()
}

async fn update_page(Path(key): Path<String>, headers: HeaderMap, Json(page): Json<Value>) -> Response {
    if !has_token(&headers) {
        return (StatusCode::from_u16(419).unwrap(), "CSRF token mismatch").into_response();
    }

    if page["slug"] == "taken" {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "message": "The given data was invalid.",
                "errors": { "slug": ["The slug has already been taken."] }
            })),
        )
            .into_response();
    }

    if key == "missing" {
        return (StatusCode::NOT_FOUND, "no such page").into_response();
    }

    // Content must arrive as a string holding the document
    match page["content"].as_str().map(serde_json::from_str::<Value>) {
        Some(Ok(doc)) if doc.get("sections").is_some() => StatusCode::OK.into_response(),
        _ => (StatusCode::BAD_REQUEST, "bad content").into_response(),
    }
}

fn app() -> Router {
    Router::new()
        .route("/admin/upload-image", post(upload))
        .route("/admin/pages/:key", put(update_page))
}

fn png(name: &str) -> ImageFile {
    ImageFile::new(name, vec![0x89, b'P', b'N', b'G']).unwrap()
}

fn page(slug: &str) -> StoredPage {
    StoredPage {
        title: "Home".to_string(),
        slug: slug.to_string(),
        content: Some(r#"{"sections":[]}"#.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_upload_returns_url() -> anyhow::Result<()> {
    let base = serve(app()).await;
    let uploader = HttpUploader::new(format!("{}/admin/upload-image", base), Some(TOKEN.to_string()));

    let url = uploader.upload(&png("x.png")).await?;
    assert_eq!(url, "/img/x.png");
    Ok(())
}

#[tokio::test]
async fn test_upload_without_token_is_server_error() {
    let base = serve(app()).await;
    let uploader = HttpUploader::new(format!("{}/admin/upload-image", base), None);

    let err = uploader.upload(&png("x.png")).await.unwrap_err();
    assert!(matches!(err, UploadError::Server { status: 419, .. }));
}

#[tokio::test]
async fn test_upload_response_without_url() {
    let base = serve(app()).await;
    let uploader = HttpUploader::new(format!("{}/admin/upload-image", base), Some(TOKEN.to_string()));

    let err = uploader.upload(&png("empty.png")).await.unwrap_err();
    assert!(matches!(err, UploadError::MissingUrl));
}

#[tokio::test]
async fn test_upload_network_failure() {
    // Bind then drop to get a port nothing listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let uploader = HttpUploader::new(format!("http://{}/admin/upload-image", addr), None);
    let err = uploader.upload(&png("x.png")).await.unwrap_err();
    assert!(matches!(err, UploadError::Network(_)));
}

#[tokio::test]
async fn test_submit_ok() -> anyhow::Result<()> {
    let base = serve(app()).await;
    let submitter = HttpSubmitter::new(format!("{}/admin/pages", base), Some(TOKEN.to_string()));

    submitter.submit(&page("home")).await?;
    Ok(())
}

#[tokio::test]
async fn test_submit_validation_errors() {
    let base = serve(app()).await;
    let submitter = HttpSubmitter::new(format!("{}/admin/pages", base), Some(TOKEN.to_string()));

    match submitter.submit(&page("taken")).await {
        Err(SubmitError::Validation(errors)) => {
            assert_eq!(errors.get("slug"), ["The slug has already been taken.".to_string()]);
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_submit_server_error() {
    let base = serve(app()).await;
    let submitter = HttpSubmitter::new(format!("{}/admin/pages", base), Some(TOKEN.to_string()));

    let err = submitter.submit(&page("missing")).await.unwrap_err();
    assert!(matches!(err, SubmitError::Server { status: 404, .. }));
}
