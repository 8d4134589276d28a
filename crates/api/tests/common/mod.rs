#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use docintake_api::config::ServerConfig;
use docintake_api::router::build_app_router;
use docintake_api::state::AppState;
use docintake_genai::flow::FlowRunner;
use docintake_genai::testing::ScriptedModel;

pub const TEST_ORIGIN: &str = "http://localhost:9002";
const BOUNDARY: &str = "----docintake-test-boundary";

/// Build a test `ServerConfig` with safe defaults, storing uploads under
/// `storage_dir`.
pub fn test_config(storage_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![TEST_ORIGIN.to_string()],
        request_timeout_secs: 30,
        storage_dir: storage_dir.to_path_buf(),
        max_upload_bytes: 1024 * 1024,
        activity_log_limit: 50,
        default_project_id: "test-project".to_string(),
    }
}

/// The application under test plus the handles tests inspect.
pub struct TestApp {
    pub router: Router,
    /// Queue replies on this to drive the AI flows.
    pub model: Arc<ScriptedModel>,
    /// Upload storage; removed when the app is dropped.
    pub storage: TempDir,
}

/// Build the full application router with all middleware layers, backed by
/// a scripted model and a temporary storage directory.
pub fn build_test_app() -> TestApp {
    let storage = tempfile::tempdir().unwrap();
    let config = test_config(storage.path());
    let model = Arc::new(ScriptedModel::new());
    let state = AppState::new(
        config.clone(),
        FlowRunner::new(model.clone()),
        reqwest::Client::new(),
    );

    TestApp {
        router: build_app_router(state, &config),
        model,
        storage,
    }
}

impl TestApp {
    /// Files written under the storage directory.
    pub fn stored_files(&self) -> Vec<std::path::PathBuf> {
        let dir = self.storage.path().join("documents");
        match std::fs::read_dir(dir) {
            Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
            Err(_) => Vec::new(),
        }
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn json_request(
    app: &Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    json_request(app, Method::POST, uri, body).await
}

pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    json_request(app, Method::PUT, uri, body).await
}

pub async fn patch_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    json_request(app, Method::PATCH, uri, body).await
}

/// POST a multipart form with a single `file` field.
pub async fn upload(app: &Router, file_name: &str, content_type: &str, data: &[u8]) -> Response {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/documents")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// Upload a plain-text document and return its JSON representation.
pub async fn upload_text(app: &Router, file_name: &str, text: &str) -> serde_json::Value {
    let response = upload(app, file_name, "text/plain", text.as_bytes()).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
