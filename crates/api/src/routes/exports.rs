use axum::routing::get;
use axum::Router;

use crate::handlers::exports;
use crate::state::AppState;

/// Export routes mounted at `/exports`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/test-cases.csv", get(exports::test_cases_csv_export))
        .route(
            "/traceability-report",
            get(exports::traceability_report_export),
        )
}
