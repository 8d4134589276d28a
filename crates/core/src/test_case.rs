//! Test cases generated from requirements, and the edits a reviewer can
//! make to them.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Kind of scenario a test case exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TestCaseType {
    Positive,
    Negative,
    #[serde(rename = "Edge Case")]
    EdgeCase,
}

impl TestCaseType {
    pub const ALL: [Self; 3] = [Self::Positive, Self::Negative, Self::EdgeCase];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::EdgeCase => "Edge Case",
        }
    }
}

/// Regulatory standard a test case provides evidence for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComplianceStandard {
    #[serde(rename = "FDA")]
    Fda,
    #[serde(rename = "IEC 62304")]
    Iec62304,
    #[serde(rename = "ISO 9001")]
    Iso9001,
    #[serde(rename = "ISO 13485")]
    Iso13485,
    #[serde(rename = "ISO 27001")]
    Iso27001,
    #[serde(rename = "GDPR")]
    Gdpr,
    #[serde(rename = "HIPAA")]
    Hipaa,
}

impl ComplianceStandard {
    pub const ALL: [Self; 7] = [
        Self::Fda,
        Self::Iec62304,
        Self::Iso9001,
        Self::Iso13485,
        Self::Iso27001,
        Self::Gdpr,
        Self::Hipaa,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fda => "FDA",
            Self::Iec62304 => "IEC 62304",
            Self::Iso9001 => "ISO 9001",
            Self::Iso13485 => "ISO 13485",
            Self::Iso27001 => "ISO 27001",
            Self::Gdpr => "GDPR",
            Self::Hipaa => "HIPAA",
        }
    }
}

// ---------------------------------------------------------------------------
// Structs
// ---------------------------------------------------------------------------

/// One step of a test procedure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestStep {
    pub step: u32,
    pub action: String,
    pub expected_result: String,
}

/// A structured test case linked to a requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub id: String,
    pub title: String,
    pub requirement_id: String,
    #[serde(default)]
    pub preconditions: Vec<String>,
    pub test_steps: Vec<TestStep>,
    #[serde(default)]
    pub test_data: Vec<String>,
    #[serde(rename = "type")]
    pub case_type: TestCaseType,
    #[serde(default)]
    pub compliance: Vec<ComplianceStandard>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jira_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jira_url: Option<String>,
}

impl TestCase {
    /// Whether this test case has been logged to the issue tracker.
    pub fn is_logged(&self) -> bool {
        self.jira_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

/// Edit to a single step, addressed by its step number.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestStepUpdate {
    pub step: u32,
    pub action: Option<String>,
    pub expected_result: Option<String>,
}

/// Reviewer edits to a test case. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseUpdate {
    pub title: Option<String>,
    pub compliance: Option<Vec<ComplianceStandard>>,
    #[serde(default)]
    pub test_steps: Vec<TestStepUpdate>,
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Number steps 1..n in their current order.
pub fn renumber_steps(steps: &mut [TestStep]) {
    for (i, step) in steps.iter_mut().enumerate() {
        step.step = i as u32 + 1;
    }
}

/// Apply a reviewer edit to a test case.
///
/// Fails without modifying anything if a step number does not exist or
/// the new title is blank.
pub fn apply_update(test_case: &mut TestCase, update: TestCaseUpdate) -> Result<(), CoreError> {
    if let Some(title) = &update.title {
        if title.trim().is_empty() {
            return Err(CoreError::Validation(
                "Test case title must not be empty".to_string(),
            ));
        }
    }
    for step_update in &update.test_steps {
        if !test_case.test_steps.iter().any(|s| s.step == step_update.step) {
            return Err(CoreError::not_found(
                "TestStep",
                format!("{}#{}", test_case.id, step_update.step),
            ));
        }
    }

    if let Some(title) = update.title {
        test_case.title = title;
    }
    if let Some(mut compliance) = update.compliance {
        compliance.sort();
        compliance.dedup();
        test_case.compliance = compliance;
    }
    for step_update in update.test_steps {
        if let Some(step) = test_case
            .test_steps
            .iter_mut()
            .find(|s| s.step == step_update.step)
        {
            if let Some(action) = step_update.action {
                step.action = action;
            }
            if let Some(expected) = step_update.expected_result {
                step.expected_result = expected;
            }
        }
    }
    Ok(())
}

/// Merge newly generated test cases into an existing list.
///
/// Generated entries replace existing entries with the same id. The
/// result is ordered by requirement id, then test-case id.
pub fn merge_test_cases(existing: Vec<TestCase>, generated: Vec<TestCase>) -> Vec<TestCase> {
    let mut merged: Vec<TestCase> = existing
        .into_iter()
        .filter(|tc| !generated.iter().any(|g| g.id == tc.id))
        .collect();
    merged.extend(generated);
    merged.sort_by(|a, b| {
        a.requirement_id
            .cmp(&b.requirement_id)
            .then_with(|| a.id.cmp(&b.id))
    });
    merged
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
