//! Integration tests for the AI-backed endpoints, driven by a scripted model.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, patch_json, post_json, upload, upload_text};
use serde_json::json;

const SRS: &str = "The system shall lock an account after five failed logins.\n\
                   The system must store audit logs for six years.";

fn extracted() -> serde_json::Value {
    json!({"requirements": [
        {"id": "R-A", "description": "The system shall lock an account after five failed logins.", "category": "Functional"},
        {"id": "R-B", "description": "The system must store audit logs for six years.", "category": "Compliance"}
    ]})
}

fn generated() -> serde_json::Value {
    json!({"testCases": [
        {
            "id": "TC-REQ-001-01",
            "title": "Lockout after five failures",
            "requirementId": "REQ-001",
            "preconditions": ["Active account"],
            "testSteps": [
                {"step": 1, "action": "Fail login five times", "expectedResult": "Account locked"},
                {"step": 3, "action": "Try valid login", "expectedResult": "Login refused"}
            ],
            "testData": ["user@example.com"],
            "type": "Negative"
        }
    ]})
}

// ---------------------------------------------------------------------------
// Requirement extraction
// ---------------------------------------------------------------------------

#[tokio::test]
async fn extraction_renumbers_ids_and_records_activity() {
    let app = build_test_app();
    upload_text(&app.router, "srs.txt", SRS).await;
    app.model.reply_json(extracted());

    let response = post_json(&app.router, "/api/v1/requirements/extract", json!({})).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["id"], "REQ-001");
    assert_eq!(json["data"][1]["id"], "REQ-002");
    assert_eq!(json["data"][1]["category"], "Compliance");

    // The stored file text is what the model sees.
    let prompt = &app.model.requests()[0].prompt;
    assert!(prompt.contains("store audit logs for six years"));

    let activity = body_json(get(&app.router, "/api/v1/activity").await).await;
    assert_eq!(activity["data"][0]["type"], "requirements_extracted");
    assert_eq!(
        activity["data"][0]["summary"],
        "Extracted 2 requirements from 'srs.txt'."
    );
}

#[tokio::test]
async fn extraction_without_document_is_rejected() {
    let app = build_test_app();

    let response = post_json(&app.router, "/api/v1/requirements/extract", json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.model.requests().is_empty());
}

#[tokio::test]
async fn pdf_requires_explicit_document_text() {
    let app = build_test_app();
    let response = upload(&app.router, "srs.pdf", "application/pdf", b"%PDF-1.7").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(&app.router, "/api/v1/requirements/extract", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"]
        .as_str()
        .unwrap()
        .contains("documentText"));

    app.model.reply_json(extracted());
    let response = post_json(
        &app.router,
        "/api/v1/requirements/extract",
        json!({"documentText": SRS}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn model_failure_returns_502_with_user_message() {
    let app = build_test_app();
    upload_text(&app.router, "srs.txt", SRS).await;
    app.model.reply_error(500, "internal");

    let response = post_json(&app.router, "/api/v1/requirements/extract", json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "MODEL_ERROR");
    assert_eq!(
        json["error"],
        "Could not extract requirements from the document."
    );
}

#[tokio::test]
async fn malformed_model_output_returns_502() {
    let app = build_test_app();
    upload_text(&app.router, "srs.txt", SRS).await;
    app.model.reply_text("not json at all");

    let response = post_json(&app.router, "/api/v1/requirements/extract", json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["code"], "INVALID_MODEL_OUTPUT");
}

#[tokio::test]
async fn requirement_can_be_edited() {
    let app = build_test_app();
    upload_text(&app.router, "srs.txt", SRS).await;
    app.model.reply_json(extracted());
    post_json(&app.router, "/api/v1/requirements/extract", json!({})).await;

    let response = patch_json(
        &app.router,
        "/api/v1/requirements/REQ-001",
        json!({"category": "Non-Functional"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["category"], "Non-Functional");
}

// ---------------------------------------------------------------------------
// Test-case generation
// ---------------------------------------------------------------------------

async fn app_with_requirements() -> common::TestApp {
    let app = build_test_app();
    upload_text(&app.router, "srs.txt", SRS).await;
    app.model.reply_json(extracted());
    let response = post_json(&app.router, "/api/v1/requirements/extract", json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    app
}

#[tokio::test]
async fn generation_merges_and_renumbers_steps() {
    let app = app_with_requirements().await;
    app.model.reply_json(generated());

    let response = post_json(
        &app.router,
        "/api/v1/test-cases/generate",
        json!({"requirementIds": ["REQ-001"]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let cases = json["data"].as_array().unwrap();
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0]["testSteps"][1]["step"], 2);
    assert_eq!(cases[0]["type"], "Negative");
    assert!(cases[0].get("jiraKey").is_none());

    let prompt = &app.model.requests()[1].prompt;
    assert!(prompt.contains("Requirement ID: REQ-001"));
    assert!(!prompt.contains("Requirement ID: REQ-002"));

    let metrics = body_json(get(&app.router, "/api/v1/metrics").await).await;
    assert_eq!(metrics["data"]["audit"]["completeness"], 50.0);
    assert_eq!(metrics["data"]["health"]["nextAction"]["action"], "generate");
}

#[tokio::test]
async fn generation_with_no_requirements_selected_is_rejected() {
    let app = app_with_requirements().await;

    let response = post_json(
        &app.router,
        "/api/v1/test-cases/generate",
        json!({"requirementIds": []}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "No Requirements Selected");
}

#[tokio::test]
async fn generation_for_unknown_requirement_returns_404() {
    let app = app_with_requirements().await;

    let response = post_json(
        &app.router,
        "/api/v1/test-cases/generate",
        json!({"requirementIds": ["REQ-999"]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_case_edit_updates_title_compliance_and_step() {
    let app = app_with_requirements().await;
    app.model.reply_json(generated());
    post_json(
        &app.router,
        "/api/v1/test-cases/generate",
        json!({"requirementIds": ["REQ-001"]}),
    )
    .await;

    let response = patch_json(
        &app.router,
        "/api/v1/test-cases/TC-REQ-001-01",
        json!({
            "title": "Account lockout",
            "compliance": ["HIPAA", "FDA"],
            "testSteps": [{"step": 2, "expectedResult": "Error shown"}]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let tc = body_json(response).await["data"].clone();
    assert_eq!(tc["title"], "Account lockout");
    assert_eq!(tc["compliance"], json!(["FDA", "HIPAA"]));
    assert_eq!(tc["testSteps"][1]["expectedResult"], "Error shown");

    let response = patch_json(
        &app.router,
        "/api/v1/test-cases/TC-REQ-001-01",
        json!({"testSteps": [{"step": 9, "action": "x"}]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Redaction and Q&A
// ---------------------------------------------------------------------------

#[tokio::test]
async fn redaction_enforces_placeholders() {
    let app = build_test_app();
    upload_text(&app.router, "note.txt", "Call Jane Doe at 555-0100.").await;
    app.model.reply_json(json!({
        "findings": [
            {"finding": "Jane Doe", "category": "PERSON"},
            {"finding": "555-0100", "category": "CONTACT"}
        ],
        "redactedText": "Call <NAME> at 555-0100."
    }));

    let response = post_json(&app.router, "/api/v1/flows/redact-pii", json!({})).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let redacted = json["data"]["redactedText"].as_str().unwrap();
    assert!(redacted.contains("[REDACTED_CONTACT]"));
    assert!(!redacted.contains("555-0100"));
    assert_eq!(json["data"]["findings"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn document_qa_answers_from_explicit_text() {
    let app = build_test_app();
    app.model.reply_json(json!({"answer": "Six years."}));

    let response = post_json(
        &app.router,
        "/api/v1/flows/document-qa",
        json!({"query": "How long are logs kept?", "documentText": SRS}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["answer"], "Six years.");
}

#[tokio::test]
async fn document_qa_blank_query_is_invalid_input() {
    let app = build_test_app();

    let response = post_json(
        &app.router,
        "/api/v1/flows/document-qa",
        json!({"query": "  ", "documentText": SRS}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_INPUT");
    assert!(app.model.requests().is_empty());
}
