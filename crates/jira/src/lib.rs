//! Jira Cloud REST client for logging test cases as issues.
//!
//! Issues are created in the configured project with an Atlassian Document
//! Format description listing the test steps. Bulk logging dispatches every
//! item concurrently and reports per-item failures without aborting.

pub mod adf;
pub mod bulk;
pub mod client;
pub mod error;

pub use bulk::{BulkLogReport, LogFailure, LoggedIssue};
pub use client::{CreatedIssue, JiraClient};
pub use error::JiraError;
