//! Derived metrics, computed on read from the current workspace.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use docintake_core::metrics::{
    audit_metrics, compliance_confidence, project_health, requirements_by_category,
    roi_estimate, test_cases_by_type, traceability_matrix, AuditMetrics, ChartPoint,
    ProjectHealth, RoiEstimate,
};
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResponse {
    pub requirement_count: usize,
    pub test_case_count: usize,
    pub audit: AuditMetrics,
    pub roi: RoiEstimate,
    pub compliance_confidence: f64,
    pub health: ProjectHealth,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartsResponse {
    pub requirements_by_category: Vec<ChartPoint>,
    pub test_cases_by_type: Vec<ChartPoint>,
}

/// GET /api/v1/metrics
pub async fn get_metrics(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let ws = state.workspace.read().await;
    let (reqs, tcs) = (ws.requirements(), ws.test_cases());

    Ok(Json(DataResponse {
        data: MetricsResponse {
            requirement_count: reqs.len(),
            test_case_count: tcs.len(),
            audit: audit_metrics(reqs, tcs),
            roi: roi_estimate(reqs.len(), tcs.len()),
            compliance_confidence: compliance_confidence(reqs, tcs),
            health: project_health(reqs, tcs),
        },
    }))
}

/// GET /api/v1/metrics/charts
pub async fn get_charts(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let ws = state.workspace.read().await;
    Ok(Json(DataResponse {
        data: ChartsResponse {
            requirements_by_category: requirements_by_category(ws.requirements()),
            test_cases_by_type: test_cases_by_type(ws.test_cases()),
        },
    }))
}

/// GET /api/v1/metrics/traceability
pub async fn get_traceability(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let ws = state.workspace.read().await;
    Ok(Json(DataResponse {
        data: traceability_matrix(ws.requirements(), ws.test_cases()),
    }))
}
