use axum::routing::{get, post};
use axum::Router;

use crate::handlers::jira;
use crate::state::AppState;

/// Jira routes mounted at `/jira`.
///
/// ```text
/// GET    /credentials               -> get_credentials
/// PUT    /credentials               -> save_credentials
/// POST   /test-cases/log            -> log_test_cases (bulk)
/// POST   /test-cases/{id}/log       -> log_test_case
/// GET    /issues/{key}/status       -> issue_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/credentials",
            get(jira::get_credentials).put(jira::save_credentials),
        )
        .route("/test-cases/log", post(jira::log_test_cases))
        .route("/test-cases/{id}/log", post(jira::log_test_case))
        .route("/issues/{key}/status", get(jira::issue_status))
}
