//! Integration tests for CSV and report exports, and derived metrics.

mod common;

use axum::http::StatusCode;
use common::{body_json, body_text, build_test_app, get, post_json, put_json, upload_text};
use serde_json::json;

async fn app_with_data() -> common::TestApp {
    let app = build_test_app();
    upload_text(&app.router, "srs.txt", "The system shall log in.").await;
    put_json(
        &app.router,
        "/api/v1/requirements",
        json!({"requirements": [
            {"id": "REQ-001", "description": "Login, with MFA", "category": "Compliance"},
            {"id": "REQ-002", "description": "Logout", "category": "Functional"}
        ]}),
    )
    .await;
    app.model.reply_json(json!({"testCases": [{
        "id": "TC-REQ-001-01",
        "title": "Login with \"MFA\"",
        "requirementId": "REQ-001",
        "preconditions": ["User exists", "MFA enrolled"],
        "testSteps": [
            {"step": 1, "action": "Enter password", "expectedResult": "Prompted, for code"},
            {"step": 2, "action": "Enter code", "expectedResult": "Logged in"}
        ],
        "testData": [],
        "type": "Positive"
    }]}));
    let response = post_json(
        &app.router,
        "/api/v1/test-cases/generate",
        json!({"requirementIds": ["REQ-001"]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    app
}

#[tokio::test]
async fn csv_export_escapes_fields_and_records_activity() {
    let app = app_with_data().await;

    let response = get(&app.router, "/api/v1/exports/test-cases.csv").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "text/csv; charset=utf-8"
    );
    assert!(response.headers()["content-disposition"]
        .to_str()
        .unwrap()
        .contains("test-cases.csv"));

    let csv = body_text(response).await;
    let (header, row) = csv.split_once('\n').unwrap();
    assert_eq!(
        header,
        "ID,Title,Requirement ID,Type,Preconditions,Test Steps,Test Data,Compliance,Jira Key,Jira URL"
    );
    assert!(row.starts_with("TC-REQ-001-01,\"Login with \"\"MFA\"\"\",REQ-001,Positive,"));
    assert!(row.contains("User exists; MFA enrolled"));
    assert!(row.contains("\"1. Enter password -> Prompted, for code\n2. Enter code -> Logged in\""));

    let activity = body_json(get(&app.router, "/api/v1/activity").await).await;
    assert_eq!(activity["data"][0]["type"], "report_downloaded");
}

#[tokio::test]
async fn csv_export_with_no_test_cases_is_header_only() {
    let app = build_test_app();

    let csv = body_text(get(&app.router, "/api/v1/exports/test-cases.csv").await).await;

    assert_eq!(csv.lines().count(), 1);
}

#[tokio::test]
async fn traceability_report_lists_matrix_and_gaps() {
    let app = app_with_data().await;

    let response = get(&app.router, "/api/v1/exports/traceability-report").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/markdown"));
    let report = body_text(response).await;
    assert!(report.contains("Document: srs.txt"));
    assert!(report.contains("| REQ-001 | Compliance | Login, with MFA | TC-REQ-001-01 |"));
    assert!(report.contains("| REQ-002 | Functional | Logout | (none) |"));
    assert!(report.contains("- Completeness: 50%"));
}

#[tokio::test]
async fn metrics_charts_and_traceability() {
    let app = app_with_data().await;

    let metrics = body_json(get(&app.router, "/api/v1/metrics").await).await;
    let data = &metrics["data"];
    assert_eq!(data["requirementCount"], 2);
    assert_eq!(data["testCaseCount"], 1);
    assert_eq!(data["complianceConfidence"], 100.0);
    // 2 requirements * 5 min + 1 test case * 15 min = 25 min.
    let hours = data["roi"]["hoursSaved"].as_f64().unwrap();
    assert!((hours - 25.0 / 60.0).abs() < 1e-9);

    let charts = body_json(get(&app.router, "/api/v1/metrics/charts").await).await;
    assert_eq!(charts["data"]["testCasesByType"][0]["label"], "Positive");
    assert_eq!(charts["data"]["testCasesByType"][0]["count"], 1);

    let matrix = body_json(get(&app.router, "/api/v1/metrics/traceability").await).await;
    assert_eq!(matrix["data"][0]["testCaseIds"], json!(["TC-REQ-001-01"]));
    assert_eq!(matrix["data"][1]["testCaseIds"], json!([]));
}

#[tokio::test]
async fn empty_workspace_metrics_are_zero() {
    let app = build_test_app();

    let metrics = body_json(get(&app.router, "/api/v1/metrics").await).await;

    assert_eq!(metrics["data"]["audit"]["readiness"], 0.0);
    assert_eq!(metrics["data"]["health"]["nextAction"]["action"], "extract");
    assert_eq!(metrics["data"]["health"]["status"], "Needs Attention");
}
