//! Handlers for Jira credentials, issue logging, and issue status.
//!
//! Credentials and test cases are snapshotted under the workspace lock,
//! the lock is released for the Jira calls, and results are written back
//! afterwards.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use docintake_core::activity::ActivityEvent;
use docintake_core::credentials::IssueTrackerCredentials;
use docintake_core::error::CoreError;
use docintake_jira::{BulkLogReport, JiraClient};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkLogRequest {
    /// Test cases to log. Defaults to every test case not yet logged.
    pub test_case_ids: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct IssueStatusResponse {
    pub key: String,
    pub status: String,
}

fn client(state: &AppState, credentials: &IssueTrackerCredentials) -> AppResult<JiraClient> {
    Ok(JiraClient::new(state.http.clone(), credentials)?)
}

/// GET /api/v1/jira/credentials
///
/// The API token is never returned, only whether one is set.
pub async fn get_credentials(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let ws = state.workspace.read().await;
    Ok(Json(DataResponse {
        data: ws.masked_credentials(),
    }))
}

/// PUT /api/v1/jira/credentials
pub async fn save_credentials(
    State(state): State<AppState>,
    Json(input): Json<IssueTrackerCredentials>,
) -> AppResult<impl IntoResponse> {
    let credentials = IssueTrackerCredentials {
        base_url: input.base_url.trim().trim_end_matches('/').to_string(),
        email: input.email.trim().to_string(),
        api_token: input.api_token.trim().to_string(),
        project_key: input.project_key.trim().to_string(),
    };
    credentials.check()?;

    let mut ws = state.workspace.write().await;
    ws.save_credentials(credentials);
    tracing::info!("Jira credentials saved");
    Ok(Json(DataResponse {
        data: ws.masked_credentials(),
    }))
}

/// POST /api/v1/jira/test-cases/{id}/log
///
/// Create a Jira issue for one test case and record its key.
pub async fn log_test_case(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let (credentials, document_id, test_case) = {
        let ws = state.workspace.read().await;
        (
            ws.credentials().clone(),
            ws.active_document_id().map(str::to_owned),
            ws.test_case(&id)?.clone(),
        )
    };
    if test_case.is_logged() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Test case {id} is already logged to Jira"
        ))));
    }

    let jira = client(&state, &credentials)?;
    let issue = jira.create_issue(&test_case).await?;

    let mut ws = state.workspace.write().await;
    if let Err(e) = ws.record_jira_issue(document_id.as_deref(), &id, &issue.key, &issue.url) {
        tracing::warn!(
            test_case_id = %id,
            issue_key = %issue.key,
            error = %e,
            "Jira issue created but not recorded"
        );
        return Err(e.into());
    }
    ws.record_activity(ActivityEvent::test_cases_logged(1));
    let updated = ws.test_case(&id)?.clone();

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/jira/test-cases/log
///
/// Log many test cases concurrently. Individual failures are reported in
/// the response and never abort the batch.
pub async fn log_test_cases(
    State(state): State<AppState>,
    Json(input): Json<BulkLogRequest>,
) -> AppResult<impl IntoResponse> {
    let (credentials, document_id, pending) = {
        let ws = state.workspace.read().await;
        let pending: Vec<_> = match &input.test_case_ids {
            Some(ids) => ws
                .select_test_cases(ids)?
                .into_iter()
                .filter(|tc| !tc.is_logged())
                .collect(),
            None => ws
                .test_cases()
                .iter()
                .filter(|tc| !tc.is_logged())
                .cloned()
                .collect(),
        };
        (
            ws.credentials().clone(),
            ws.active_document_id().map(str::to_owned),
            pending,
        )
    };

    let jira = client(&state, &credentials)?;
    if pending.is_empty() {
        return Ok(Json(DataResponse {
            data: BulkLogReport::default(),
        }));
    }

    let report = jira.log_test_cases(&pending).await;

    let mut ws = state.workspace.write().await;
    for logged in &report.logged {
        // Fails if the test case was removed or the active document changed
        // while the batch was running. The report still lists the issue.
        if let Err(e) = ws.record_jira_issue(
            document_id.as_deref(),
            &logged.test_case_id,
            &logged.issue.key,
            &logged.issue.url,
        ) {
            tracing::warn!(
                test_case_id = %logged.test_case_id,
                issue_key = %logged.issue.key,
                error = %e,
                "Could not record Jira issue"
            );
        }
    }
    if report.succeeded > 0 {
        ws.record_activity(ActivityEvent::test_cases_logged(report.succeeded));
    }

    Ok(Json(DataResponse { data: report }))
}

/// GET /api/v1/jira/issues/{key}/status
pub async fn issue_status(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<impl IntoResponse> {
    let credentials = state.workspace.read().await.credentials().clone();
    let jira = client(&state, &credentials)?;
    let status = jira.issue_status(&key).await?;

    Ok(Json(DataResponse {
        data: IssueStatusResponse { key, status },
    }))
}
