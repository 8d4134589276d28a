//! Handlers for test-case generation and editing.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use docintake_core::test_case::TestCaseUpdate;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub requirement_ids: Vec<String>,
}

/// GET /api/v1/test-cases
pub async fn list_test_cases(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let ws = state.workspace.read().await;
    Ok(Json(DataResponse {
        data: ws.test_cases().to_vec(),
    }))
}

/// POST /api/v1/test-cases/generate
///
/// Generate test cases for the selected requirements and merge them into
/// the current list. Returns the merged list.
pub async fn generate_test_cases(
    State(state): State<AppState>,
    Json(input): Json<GenerateRequest>,
) -> AppResult<impl IntoResponse> {
    if input.requirement_ids.is_empty() {
        return Err(AppError::BadRequest("No Requirements Selected".into()));
    }

    let (document_id, selected) = {
        let ws = state.workspace.read().await;
        (
            ws.active_document_id().map(str::to_string),
            ws.select_requirements(&input.requirement_ids)?,
        )
    };

    let generated = state.flows.generate_test_cases(selected).await?;
    let generated_count = generated.len();

    let mut ws = state.workspace.write().await;
    let test_cases = ws
        .apply_generated(document_id.as_deref(), generated)?
        .to_vec();

    tracing::info!(
        generated = generated_count,
        total = test_cases.len(),
        "Test cases generated"
    );
    Ok(Json(DataResponse { data: test_cases }))
}

/// PATCH /api/v1/test-cases/{id}
///
/// Edit title, compliance tags, or individual steps.
pub async fn update_test_case(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<TestCaseUpdate>,
) -> AppResult<impl IntoResponse> {
    let mut ws = state.workspace.write().await;
    let test_case = ws.update_test_case(&id, input)?.clone();
    Ok(Json(DataResponse { data: test_case }))
}
