pub mod documents;
pub mod exports;
pub mod flows;
pub mod health;
pub mod jira;
pub mod metrics;
pub mod requirements;
pub mod test_cases;
pub mod workspace;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /documents                                  list, upload (multipart)
/// /documents/{id}                             get, update status, delete
/// /documents/{id}/activate                    set active document (POST)
///
/// /workspace                                  active document + counts
/// /workspace/active                           clear selection (DELETE)
///
/// /requirements                               list, replace all (PUT)
/// /requirements/extract                       run extraction (POST)
/// /requirements/{id}                          edit (PATCH)
///
/// /test-cases                                 list
/// /test-cases/generate                        generate for requirement ids (POST)
/// /test-cases/{id}                            edit (PATCH)
///
/// /flows/redact-pii                           PII redaction (POST)
/// /flows/document-qa                          document Q&A (POST)
///
/// /jira/credentials                           get (masked), save (PUT)
/// /jira/test-cases/log                        bulk log (POST)
/// /jira/test-cases/{id}/log                   log one (POST)
/// /jira/issues/{key}/status                   issue status
///
/// /metrics                                    audit metrics, ROI, health
/// /metrics/charts                             chart series
/// /metrics/traceability                       traceability matrix
///
/// /exports/test-cases.csv                     CSV download
/// /exports/traceability-report                Markdown download
///
/// /activity                                   recent activity
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/documents", documents::router())
        .nest("/workspace", workspace::router())
        .nest("/requirements", requirements::router())
        .nest("/test-cases", test_cases::router())
        .nest("/flows", flows::router())
        .nest("/jira", jira::router())
        .nest("/metrics", metrics::router())
        .nest("/exports", exports::router())
        .route("/activity", get(handlers::activity::list_activity))
}
