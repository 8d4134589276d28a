//! File downloads: test-case CSV and the traceability report.

use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;
use docintake_core::activity::ActivityEvent;
use docintake_core::export::{test_cases_csv, traceability_report};

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/v1/exports/test-cases.csv
pub async fn test_cases_csv_export(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mut ws = state.workspace.write().await;
    let csv = test_cases_csv(ws.test_cases());
    ws.record_activity(ActivityEvent::report_downloaded("test case CSV"));

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8"),
            (CONTENT_DISPOSITION, "attachment; filename=\"test-cases.csv\""),
        ],
        csv,
    ))
}

/// GET /api/v1/exports/traceability-report
pub async fn traceability_report_export(
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let mut ws = state.workspace.write().await;
    let report = traceability_report(
        ws.active_document(),
        ws.requirements(),
        ws.test_cases(),
        chrono::Utc::now(),
    );
    ws.record_activity(ActivityEvent::report_downloaded("traceability"));

    Ok((
        [
            (CONTENT_TYPE, "text/markdown; charset=utf-8"),
            (
                CONTENT_DISPOSITION,
                "attachment; filename=\"traceability-report.md\"",
            ),
        ],
        report,
    ))
}
