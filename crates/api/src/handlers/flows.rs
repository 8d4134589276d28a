//! Stand-alone flows over the active document: PII redaction and Q&A.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::resolve_document_text;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactRequest {
    pub document_text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QaRequest {
    pub query: String,
    pub document_text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QaResponse {
    pub answer: String,
}

/// POST /api/v1/flows/redact-pii
pub async fn redact_pii(
    State(state): State<AppState>,
    Json(input): Json<RedactRequest>,
) -> AppResult<impl IntoResponse> {
    let document = state.workspace.read().await.active_document().cloned();
    let text = resolve_document_text(document.as_ref(), input.document_text).await?;

    let output = state.flows.redact_pii(&text).await?;
    tracing::info!(findings = output.findings.len(), "PII redacted");
    Ok(Json(DataResponse { data: output }))
}

/// POST /api/v1/flows/document-qa
pub async fn document_qa(
    State(state): State<AppState>,
    Json(input): Json<QaRequest>,
) -> AppResult<impl IntoResponse> {
    let document = state.workspace.read().await.active_document().cloned();
    let text = resolve_document_text(document.as_ref(), input.document_text).await?;

    let answer = state.flows.answer_question(&text, &input.query).await?;
    Ok(Json(DataResponse {
        data: QaResponse { answer },
    }))
}
