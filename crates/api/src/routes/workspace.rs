use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::workspace;
use crate::state::AppState;

/// Workspace routes mounted at `/workspace`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(workspace::get_workspace))
        .route("/active", delete(workspace::clear_active))
}
