use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::requirements;
use crate::state::AppState;

/// Requirement routes mounted at `/requirements`.
///
/// ```text
/// GET    /                  -> list_requirements
/// PUT    /                  -> replace_requirements
/// POST   /extract           -> extract_requirements
/// PATCH  /{id}              -> update_requirement
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(requirements::list_requirements).put(requirements::replace_requirements),
        )
        .route("/extract", post(requirements::extract_requirements))
        .route("/{id}", patch(requirements::update_requirement))
}
