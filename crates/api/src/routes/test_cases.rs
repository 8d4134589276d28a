use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::test_cases;
use crate::state::AppState;

/// Test-case routes mounted at `/test-cases`.
///
/// ```text
/// GET    /                  -> list_test_cases
/// POST   /generate          -> generate_test_cases
/// PATCH  /{id}              -> update_test_case
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(test_cases::list_test_cases))
        .route("/generate", post(test_cases::generate_test_cases))
        .route("/{id}", patch(test_cases::update_test_case))
}
