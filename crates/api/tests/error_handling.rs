//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests do NOT need an HTTP server -- they call `IntoResponse`
//! directly on `AppError` values.

use axum::response::IntoResponse;
use docintake_api::error::AppError;
use docintake_core::error::CoreError;
use docintake_genai::flow::FlowError;
use docintake_genai::model::ModelError;
use docintake_jira::JiraError;
use http_body_util::BodyExt;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (axum::http::StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Core errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::not_found("Document", "abc"));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Document with id abc not found");
}

#[tokio::test]
async fn conflict_error_returns_409() {
    let err = AppError::Core(CoreError::Conflict("duplicate id".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "duplicate id");
}

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("disk path /var/secret unreadable".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Flow errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn flow_invalid_input_returns_400() {
    let err = AppError::Flow(FlowError::InvalidInput {
        flow: "documentQa",
        message: "query must not be empty".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_INPUT");
    assert_eq!(json["error"], "query must not be empty");
}

#[tokio::test]
async fn model_error_returns_502_without_provider_details() {
    let err = AppError::Flow(FlowError::Model {
        flow: "generateTestCases",
        source: ModelError::Api {
            status: 401,
            body: "API key sk-123 invalid".into(),
        },
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "MODEL_ERROR");
    assert!(!json["error"].as_str().unwrap().contains("sk-123"));
}

// ---------------------------------------------------------------------------
// Jira errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn jira_errors_map_to_400_and_502() {
    let (status, json) = error_to_response(AppError::Jira(JiraError::MissingCredentials)).await;
    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Jira credentials are not fully provided.");

    let (status, _) = error_to_response(AppError::Jira(JiraError::InvalidBaseUrl)).await;
    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);

    let (status, json) = error_to_response(AppError::Jira(JiraError::Api {
        status: 400,
        message: "Project 'X' does not exist".into(),
    }))
    .await;
    assert_eq!(status, axum::http::StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "JIRA_ERROR");
    assert_eq!(json["error"], "Project 'X' does not exist");
}
