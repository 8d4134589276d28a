use axum::routing::{get, post};
use axum::Router;

use crate::handlers::documents;
use crate::state::AppState;

/// Document routes mounted at `/documents`.
///
/// ```text
/// GET    /                  -> list_documents
/// POST   /                  -> upload_document
/// GET    /{id}              -> get_document
/// PATCH  /{id}              -> update_document
/// DELETE /{id}              -> delete_document
/// POST   /{id}/activate     -> activate_document
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(documents::list_documents).post(documents::upload_document),
        )
        .route(
            "/{id}",
            get(documents::get_document)
                .patch(documents::update_document)
                .delete(documents::delete_document),
        )
        .route("/{id}/activate", post(documents::activate_document))
}
