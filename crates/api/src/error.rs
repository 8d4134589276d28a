use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use docintake_core::error::CoreError;
use docintake_genai::flow::FlowError;
use docintake_jira::JiraError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors, the flow and Jira client errors
/// for outbound calls, and adds HTTP-specific variants. Implements
/// [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `docintake_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A generative-model flow failed.
    #[error(transparent)]
    Flow(#[from] FlowError),

    /// A Jira call failed or could not be made.
    #[error(transparent)]
    Jira(#[from] JiraError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Message shown to the user when a flow's model call or output fails.
pub fn flow_failure_message(flow: &str) -> &'static str {
    match flow {
        "extractRequirements" => "Could not extract requirements from the document.",
        "generateTestCases" => "Could not generate test cases for the selected requirements.",
        "redactPii" => "Could not redact PII from the document.",
        "documentQa" => "Could not get an answer from the document.",
        _ => "The AI request failed.",
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        INTERNAL_MESSAGE.to_string(),
                    )
                }
            },

            // --- Flow errors ---
            AppError::Flow(err) => match err {
                FlowError::InvalidInput { message, .. } => {
                    (StatusCode::BAD_REQUEST, "INVALID_INPUT", message.clone())
                }
                FlowError::Model { flow, source } => {
                    tracing::error!(flow = *flow, error = %source, "Model call failed");
                    (
                        StatusCode::BAD_GATEWAY,
                        "MODEL_ERROR",
                        flow_failure_message(flow).to_string(),
                    )
                }
                FlowError::InvalidOutput { flow, message } => {
                    tracing::error!(flow = *flow, error = %message, "Model returned invalid output");
                    (
                        StatusCode::BAD_GATEWAY,
                        "INVALID_MODEL_OUTPUT",
                        flow_failure_message(flow).to_string(),
                    )
                }
            },

            // --- Jira errors ---
            AppError::Jira(err) => match err {
                JiraError::MissingCredentials => {
                    (StatusCode::BAD_REQUEST, "JIRA_NOT_CONFIGURED", err.to_string())
                }
                JiraError::InvalidBaseUrl => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
                }
                JiraError::Api { message, .. } => {
                    (StatusCode::BAD_GATEWAY, "JIRA_ERROR", message.clone())
                }
                JiraError::Request(source) => {
                    tracing::error!(error = %source, "Jira request failed");
                    (
                        StatusCode::BAD_GATEWAY,
                        "JIRA_UNREACHABLE",
                        "Could not reach Jira.".to_string(),
                    )
                }
            },

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
