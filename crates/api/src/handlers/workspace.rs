use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/workspace
pub async fn get_workspace(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let ws = state.workspace.read().await;
    Ok(Json(DataResponse { data: ws.summary() }))
}

/// DELETE /api/v1/workspace/active
///
/// Deselect the active document, clearing requirements and test cases.
pub async fn clear_active(State(state): State<AppState>) -> AppResult<StatusCode> {
    state.workspace.write().await.clear_active();
    Ok(StatusCode::NO_CONTENT)
}
