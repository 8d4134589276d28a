//! Concurrent logging of many test cases.

use docintake_core::test_case::TestCase;
use futures::future::join_all;
use serde::Serialize;

use crate::client::{CreatedIssue, JiraClient};

/// A test case that was logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedIssue {
    pub test_case_id: String,
    pub issue: CreatedIssue,
}

/// A test case that could not be logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFailure {
    pub test_case_id: String,
    pub message: String,
}

/// Outcome of a bulk logging run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkLogReport {
    /// Number of issues created.
    pub succeeded: usize,
    pub failures: Vec<LogFailure>,
    pub logged: Vec<LoggedIssue>,
}

impl BulkLogReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

impl JiraClient {
    /// Create one issue per test case, all in flight at once.
    ///
    /// A failure never stops the other requests. There is no retry and no
    /// rollback of issues already created.
    pub async fn log_test_cases(&self, test_cases: &[TestCase]) -> BulkLogReport {
        let results = join_all(test_cases.iter().map(|tc| self.create_issue(tc))).await;

        let mut report = BulkLogReport::default();
        for (tc, result) in test_cases.iter().zip(results) {
            match result {
                Ok(issue) => {
                    report.succeeded += 1;
                    report.logged.push(LoggedIssue {
                        test_case_id: tc.id.clone(),
                        issue,
                    });
                }
                Err(e) => report.failures.push(LogFailure {
                    test_case_id: tc.id.clone(),
                    message: e.to_string(),
                }),
            }
        }

        tracing::info!(
            requested = test_cases.len(),
            succeeded = report.succeeded,
            failed = report.failed(),
            "Bulk Jira logging finished"
        );
        report
    }
}
