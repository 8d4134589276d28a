//! Activity feed entries recorded as the user works through a document.
//!
//! Constructed via the named constructors on [`ActivityEvent`]; each one
//! fills in the `details` payload and the rendered `summary` line shown in
//! the recent-activity feed.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::types::{new_entity_id, EntityId, Timestamp};

/// Kind of activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityEventType {
    DocumentUploaded,
    RequirementsExtracted,
    TestCasesGenerated,
    TestCasesLogged,
    ReportDownloaded,
}

/// A single entry in the activity log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    pub id: EntityId,
    pub timestamp: Timestamp,
    #[serde(rename = "type")]
    pub event_type: ActivityEventType,
    /// Free-form, event-specific data.
    pub details: serde_json::Value,
    /// One-line human-readable description.
    pub summary: String,
}

impl ActivityEvent {
    fn new(event_type: ActivityEventType, details: serde_json::Value, summary: String) -> Self {
        Self {
            id: new_entity_id(),
            timestamp: chrono::Utc::now(),
            event_type,
            details,
            summary,
        }
    }

    pub fn document_uploaded(document_name: &str) -> Self {
        Self::new(
            ActivityEventType::DocumentUploaded,
            json!({ "documentName": document_name }),
            format!("Uploaded '{document_name}'."),
        )
    }

    pub fn requirements_extracted(document_name: &str, count: usize) -> Self {
        Self::new(
            ActivityEventType::RequirementsExtracted,
            json!({ "documentName": document_name, "count": count }),
            format!("Extracted {count} requirements from '{document_name}'."),
        )
    }

    pub fn test_cases_generated(count: usize) -> Self {
        Self::new(
            ActivityEventType::TestCasesGenerated,
            json!({ "count": count }),
            format!("Generated {count} test cases."),
        )
    }

    pub fn test_cases_logged(count: usize) -> Self {
        Self::new(
            ActivityEventType::TestCasesLogged,
            json!({ "count": count }),
            format!("Logged {count} test cases to Jira."),
        )
    }

    pub fn report_downloaded(report_type: &str) -> Self {
        Self::new(
            ActivityEventType::ReportDownloaded,
            json!({ "reportType": report_type }),
            format!("Downloaded the {report_type} report."),
        )
    }
}
