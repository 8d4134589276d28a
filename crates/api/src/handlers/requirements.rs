//! Handlers for requirement extraction and editing.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use docintake_core::requirement::{Requirement, RequirementUpdate};
use serde::Deserialize;

use super::resolve_document_text;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractRequest {
    /// Text to use instead of the stored file. Required for PDF and DOCX.
    pub document_text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReplaceRequirementsRequest {
    pub requirements: Vec<Requirement>,
}

/// GET /api/v1/requirements
pub async fn list_requirements(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let ws = state.workspace.read().await;
    Ok(Json(DataResponse {
        data: ws.requirements().to_vec(),
    }))
}

/// PUT /api/v1/requirements
///
/// Replace the whole list. Ids must be unique and descriptions non-empty.
pub async fn replace_requirements(
    State(state): State<AppState>,
    Json(input): Json<ReplaceRequirementsRequest>,
) -> AppResult<impl IntoResponse> {
    let mut ws = state.workspace.write().await;
    ws.replace_requirements(input.requirements)?;
    tracing::info!(count = ws.requirements().len(), "Requirements replaced");
    Ok(Json(DataResponse {
        data: ws.requirements().to_vec(),
    }))
}

/// POST /api/v1/requirements/extract
///
/// Run requirement extraction on the active document. Replaces the current
/// requirements and clears test cases.
pub async fn extract_requirements(
    State(state): State<AppState>,
    Json(input): Json<ExtractRequest>,
) -> AppResult<impl IntoResponse> {
    let document = state
        .workspace
        .read()
        .await
        .active_document()
        .cloned()
        .ok_or_else(|| {
            AppError::BadRequest("No document selected. Upload or select a document first.".into())
        })?;

    let text = resolve_document_text(Some(&document), input.document_text).await?;
    let extracted = state.flows.extract_requirements(&text).await?;

    let mut ws = state.workspace.write().await;
    let requirements = ws.apply_extraction(&document.id, extracted)?.to_vec();

    tracing::info!(
        document_id = %document.id,
        count = requirements.len(),
        "Requirements extracted"
    );
    Ok(Json(DataResponse { data: requirements }))
}

/// PATCH /api/v1/requirements/{id}
pub async fn update_requirement(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<RequirementUpdate>,
) -> AppResult<impl IntoResponse> {
    let mut ws = state.workspace.write().await;
    let requirement = ws.update_requirement(&id, input)?.clone();
    Ok(Json(DataResponse { data: requirement }))
}
