use axum::routing::post;
use axum::Router;

use crate::handlers::flows;
use crate::state::AppState;

/// Flow routes mounted at `/flows`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/redact-pii", post(flows::redact_pii))
        .route("/document-qa", post(flows::document_qa))
}
