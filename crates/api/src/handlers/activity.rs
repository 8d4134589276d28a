use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/activity
///
/// Recent activity, newest first.
pub async fn list_activity(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let ws = state.workspace.read().await;
    Ok(Json(DataResponse { data: ws.activity() }))
}
