//! In-memory workspace store.
//!
//! Holds the document list, the active document, the requirements and test
//! cases derived from it, the activity feed, and the Jira credentials.
//! Requirements and test cases always belong to the active document, so
//! anything that changes the active document clears them.
//!
//! Handlers hold the lock only long enough to snapshot inputs or apply
//! results. Results of slow calls are applied with [`Workspace::apply_extraction`],
//! [`Workspace::apply_generated`] and [`Workspace::record_jira_issue`], which
//! refuse to write if the active document changed while the call was in flight.

use std::collections::VecDeque;

use docintake_core::activity::ActivityEvent;
use docintake_core::credentials::{IssueTrackerCredentials, MaskedCredentials};
use docintake_core::document::{Document, DocumentStatus};
use docintake_core::error::CoreError;
use docintake_core::requirement::{
    apply_requirement_update, renumber_requirements, validate_requirements, Requirement,
    RequirementUpdate,
};
use docintake_core::test_case::{apply_update, merge_test_cases, TestCase, TestCaseUpdate};
use docintake_core::types::EntityId;
use serde::Serialize;

const STALE_DOCUMENT: &str = "The active document changed while the request was running.";

/// Active document and counts, for the workspace header.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSummary {
    pub active_document: Option<Document>,
    pub document_count: usize,
    pub requirement_count: usize,
    pub test_case_count: usize,
    pub logged_test_case_count: usize,
    pub jira_configured: bool,
}

pub struct Workspace {
    documents: Vec<Document>,
    active_document_id: Option<EntityId>,
    requirements: Vec<Requirement>,
    test_cases: Vec<TestCase>,
    activity: VecDeque<ActivityEvent>,
    activity_limit: usize,
    credentials: IssueTrackerCredentials,
}

impl Workspace {
    pub fn new(activity_limit: usize) -> Self {
        Self {
            documents: Vec::new(),
            active_document_id: None,
            requirements: Vec::new(),
            test_cases: Vec::new(),
            activity: VecDeque::new(),
            activity_limit: activity_limit.max(1),
            credentials: IssueTrackerCredentials::default(),
        }
    }

    // -----------------------------------------------------------------------
    // Documents
    // -----------------------------------------------------------------------

    /// All documents, newest first.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn document(&self, id: &str) -> Result<&Document, CoreError> {
        self.documents
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| CoreError::not_found("Document", id))
    }

    pub fn active_document_id(&self) -> Option<&str> {
        self.active_document_id.as_deref()
    }

    pub fn active_document(&self) -> Option<&Document> {
        let id = self.active_document_id.as_deref()?;
        self.documents.iter().find(|d| d.id == id)
    }

    /// Add an uploaded document and make it active.
    pub fn add_document(&mut self, document: Document) {
        self.record_activity(ActivityEvent::document_uploaded(&document.name));
        self.active_document_id = Some(document.id.clone());
        self.documents.insert(0, document);
        self.clear_derived();
    }

    /// Make `id` the active document. Returns `false` if it already was.
    pub fn set_active(&mut self, id: &str) -> Result<bool, CoreError> {
        self.document(id)?;
        if self.active_document_id.as_deref() == Some(id) {
            return Ok(false);
        }
        self.active_document_id = Some(id.to_string());
        self.clear_derived();
        Ok(true)
    }

    pub fn clear_active(&mut self) {
        if self.active_document_id.take().is_some() {
            self.clear_derived();
        }
    }

    /// Remove a document. Deleting the active document clears the selection.
    pub fn delete_document(&mut self, id: &str) -> Result<Document, CoreError> {
        let index = self
            .documents
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| CoreError::not_found("Document", id))?;
        let removed = self.documents.remove(index);
        if self.active_document_id.as_deref() == Some(id) {
            self.clear_active();
        }
        Ok(removed)
    }

    pub fn update_document_status(
        &mut self,
        id: &str,
        status: DocumentStatus,
    ) -> Result<&Document, CoreError> {
        let doc = self
            .documents
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| CoreError::not_found("Document", id))?;
        doc.status = status;
        doc.modified_at = chrono::Utc::now();
        Ok(doc)
    }

    fn clear_derived(&mut self) {
        self.requirements.clear();
        self.test_cases.clear();
    }

    fn ensure_active(&self, expected: Option<&str>) -> Result<(), CoreError> {
        if self.active_document_id.as_deref() != expected {
            return Err(CoreError::Conflict(STALE_DOCUMENT.to_string()));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Requirements
    // -----------------------------------------------------------------------

    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    /// Replace the whole list, as saved from the edit dialog.
    pub fn replace_requirements(&mut self, requirements: Vec<Requirement>) -> Result<(), CoreError> {
        validate_requirements(&requirements)?;
        self.requirements = requirements;
        Ok(())
    }

    /// Store freshly extracted requirements for `document_id`.
    ///
    /// Ids are renumbered `REQ-001..` and existing test cases are cleared,
    /// since they referenced the previous numbering.
    pub fn apply_extraction(
        &mut self,
        document_id: &str,
        requirements: Vec<Requirement>,
    ) -> Result<&[Requirement], CoreError> {
        self.ensure_active(Some(document_id))?;
        let document_name = self.document(document_id)?.name.clone();

        self.requirements = renumber_requirements(requirements);
        self.test_cases.clear();
        self.record_activity(ActivityEvent::requirements_extracted(
            &document_name,
            self.requirements.len(),
        ));
        Ok(&self.requirements)
    }

    pub fn update_requirement(
        &mut self,
        id: &str,
        update: RequirementUpdate,
    ) -> Result<&Requirement, CoreError> {
        let req = self
            .requirements
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| CoreError::not_found("Requirement", id))?;
        apply_requirement_update(req, update)?;
        Ok(req)
    }

    /// Look up requirements by id, in the order given.
    pub fn select_requirements(&self, ids: &[String]) -> Result<Vec<Requirement>, CoreError> {
        let mut selected: Vec<Requirement> = Vec::with_capacity(ids.len());
        for id in ids {
            if selected.iter().any(|r| &r.id == id) {
                continue;
            }
            let req = self
                .requirements
                .iter()
                .find(|r| &r.id == id)
                .ok_or_else(|| CoreError::not_found("Requirement", id.as_str()))?;
            selected.push(req.clone());
        }
        Ok(selected)
    }

    // -----------------------------------------------------------------------
    // Test cases
    // -----------------------------------------------------------------------

    pub fn test_cases(&self) -> &[TestCase] {
        &self.test_cases
    }

    pub fn test_case(&self, id: &str) -> Result<&TestCase, CoreError> {
        self.test_cases
            .iter()
            .find(|tc| tc.id == id)
            .ok_or_else(|| CoreError::not_found("TestCase", id))
    }

    /// Look up `ids` in request order, skipping repeats.
    pub fn select_test_cases(&self, ids: &[String]) -> Result<Vec<TestCase>, CoreError> {
        let mut selected: Vec<TestCase> = Vec::with_capacity(ids.len());
        for id in ids {
            if selected.iter().any(|tc| &tc.id == id) {
                continue;
            }
            selected.push(self.test_case(id)?.clone());
        }
        Ok(selected)
    }

    /// Merge generated test cases produced while `document_id` was active.
    pub fn apply_generated(
        &mut self,
        document_id: Option<&str>,
        generated: Vec<TestCase>,
    ) -> Result<&[TestCase], CoreError> {
        self.ensure_active(document_id)?;
        let count = generated.len();
        let existing = std::mem::take(&mut self.test_cases);
        self.test_cases = merge_test_cases(existing, generated);
        self.record_activity(ActivityEvent::test_cases_generated(count));
        Ok(&self.test_cases)
    }

    pub fn update_test_case(
        &mut self,
        id: &str,
        update: TestCaseUpdate,
    ) -> Result<&TestCase, CoreError> {
        let tc = self
            .test_cases
            .iter_mut()
            .find(|tc| tc.id == id)
            .ok_or_else(|| CoreError::not_found("TestCase", id))?;
        apply_update(tc, update)?;
        Ok(tc)
    }

    /// Write back the Jira issue created for a test case of `document_id`.
    pub fn record_jira_issue(
        &mut self,
        document_id: Option<&str>,
        test_case_id: &str,
        key: &str,
        url: &str,
    ) -> Result<(), CoreError> {
        self.ensure_active(document_id)?;
        let tc = self
            .test_cases
            .iter_mut()
            .find(|tc| tc.id == test_case_id)
            .ok_or_else(|| CoreError::not_found("TestCase", test_case_id))?;
        tc.jira_key = Some(key.to_string());
        tc.jira_url = Some(url.to_string());
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Activity
    // -----------------------------------------------------------------------

    /// Activity feed, newest first.
    pub fn activity(&self) -> Vec<ActivityEvent> {
        self.activity.iter().cloned().collect()
    }

    pub fn record_activity(&mut self, event: ActivityEvent) {
        tracing::debug!(summary = %event.summary, "Activity recorded");
        self.activity.push_front(event);
        self.activity.truncate(self.activity_limit);
    }

    // -----------------------------------------------------------------------
    // Credentials
    // -----------------------------------------------------------------------

    pub fn credentials(&self) -> &IssueTrackerCredentials {
        &self.credentials
    }

    pub fn masked_credentials(&self) -> MaskedCredentials {
        self.credentials.masked()
    }

    pub fn save_credentials(&mut self, credentials: IssueTrackerCredentials) {
        self.credentials = credentials;
    }

    pub fn summary(&self) -> WorkspaceSummary {
        WorkspaceSummary {
            active_document: self.active_document().cloned(),
            document_count: self.documents.len(),
            requirement_count: self.requirements.len(),
            test_case_count: self.test_cases.len(),
            logged_test_case_count: self.test_cases.iter().filter(|tc| tc.is_logged()).count(),
            jira_configured: self.credentials.is_configured(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
