//! Derived dashboard metrics (coverage, traceability, ROI, project health).
//!
//! Pure functions over the current requirement and test-case lists; the
//! workspace store computes them on read and never caches the results.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::requirement::{Requirement, RequirementCategory};
use crate::test_case::{TestCase, TestCaseType};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Blended analyst/QA hourly rate used for the ROI estimate.
pub const AVG_HOURLY_RATE_USD: f64 = 75.0;
/// Manual effort saved per extracted requirement.
pub const TIME_SAVED_PER_REQUIREMENT_MINS: f64 = 5.0;
/// Manual effort saved per generated test case.
pub const TIME_SAVED_PER_TEST_CASE_MINS: f64 = 15.0;
/// Test cases per requirement that count as fully mature.
pub const TARGET_TESTS_PER_REQUIREMENT: f64 = 3.0;

pub const HEALTH_EXCELLENT_THRESHOLD: f64 = 80.0;
pub const HEALTH_GOOD_THRESHOLD: f64 = 50.0;

// ---------------------------------------------------------------------------
// Structs
// ---------------------------------------------------------------------------

/// Audit-readiness scores. Percentages are in `0.0..=100.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditMetrics {
    /// Requirements covered by at least one test case.
    pub completeness: f64,
    /// Test cases logged to the issue tracker.
    pub traceability: f64,
    /// Average test cases per requirement.
    pub maturity: f64,
    /// Mean of completeness, traceability and normalized maturity.
    pub readiness: f64,
}

/// Estimated savings from automated extraction and generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiEstimate {
    pub hours_saved: f64,
    pub cost_saved_usd: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthStatus {
    Excellent,
    Good,
    #[serde(rename = "Needs Attention")]
    NeedsAttention,
}

/// Recommended next step for the active document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum NextAction {
    /// No requirements yet.
    Extract,
    /// Some requirements have no test case.
    Generate { uncovered: usize },
    /// Some test cases are not in the tracker.
    Log { unlogged: usize },
    Done,
}

impl NextAction {
    pub fn message(&self) -> String {
        match self {
            Self::Extract => "Start by extracting requirements from your document.".to_string(),
            Self::Generate { uncovered } => format!(
                "Your next step is to generate test cases for the {uncovered} uncovered requirements."
            ),
            Self::Log { unlogged } => format!(
                "Improve your traceability by logging the remaining {unlogged} test cases to Jira."
            ),
            Self::Done => "All requirements are covered and traced. Great job!".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectHealth {
    pub status: HealthStatus,
    pub readiness: u8,
    pub next_action: NextAction,
    pub next_action_message: String,
}

/// One bar of a count-by-label chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub label: &'static str,
    pub count: usize,
}

/// One row of the traceability matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceabilityRow {
    pub requirement_id: String,
    pub description: String,
    pub category: RequirementCategory,
    pub test_case_ids: Vec<String>,
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

fn pct(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

/// Ids of requirements that have at least one test case.
fn covered_requirement_ids<'a>(
    requirements: &'a [Requirement],
    test_cases: &[TestCase],
) -> HashSet<&'a str> {
    let linked: HashSet<&str> = test_cases.iter().map(|tc| tc.requirement_id.as_str()).collect();
    requirements
        .iter()
        .map(|r| r.id.as_str())
        .filter(|id| linked.contains(id))
        .collect()
}

/// Compute audit metrics. All zeros when there are no requirements.
pub fn audit_metrics(requirements: &[Requirement], test_cases: &[TestCase]) -> AuditMetrics {
    let total_requirements = requirements.len();
    if total_requirements == 0 {
        return AuditMetrics {
            completeness: 0.0,
            traceability: 0.0,
            maturity: 0.0,
            readiness: 0.0,
        };
    }

    let covered = covered_requirement_ids(requirements, test_cases).len();
    let completeness = pct(covered, total_requirements);

    let logged = test_cases.iter().filter(|tc| tc.is_logged()).count();
    let traceability = pct(logged, test_cases.len());

    let maturity = test_cases.len() as f64 / total_requirements as f64;
    let normalized_maturity = (maturity / TARGET_TESTS_PER_REQUIREMENT * 100.0).min(100.0);

    let readiness = (completeness + traceability + normalized_maturity) / 3.0;

    AuditMetrics {
        completeness,
        traceability,
        maturity,
        readiness,
    }
}

/// Estimate time and cost saved by automation.
pub fn roi_estimate(requirement_count: usize, test_case_count: usize) -> RoiEstimate {
    let minutes = requirement_count as f64 * TIME_SAVED_PER_REQUIREMENT_MINS
        + test_case_count as f64 * TIME_SAVED_PER_TEST_CASE_MINS;
    let hours_saved = minutes / 60.0;
    RoiEstimate {
        hours_saved,
        cost_saved_usd: hours_saved * AVG_HOURLY_RATE_USD,
    }
}

/// Percentage of compliance requirements covered by test cases.
///
/// Returns 100 when the document has no compliance requirements.
pub fn compliance_confidence(requirements: &[Requirement], test_cases: &[TestCase]) -> f64 {
    let compliance: Vec<Requirement> = requirements
        .iter()
        .filter(|r| r.category == RequirementCategory::Compliance)
        .cloned()
        .collect();
    if compliance.is_empty() {
        return 100.0;
    }
    let covered = covered_requirement_ids(&compliance, test_cases).len();
    pct(covered, compliance.len())
}

/// Summarize project health and pick the next recommended action.
pub fn project_health(requirements: &[Requirement], test_cases: &[TestCase]) -> ProjectHealth {
    let metrics = audit_metrics(requirements, test_cases);
    let readiness = metrics.readiness.round().clamp(0.0, 100.0) as u8;

    let status = if metrics.readiness >= HEALTH_EXCELLENT_THRESHOLD {
        HealthStatus::Excellent
    } else if metrics.readiness >= HEALTH_GOOD_THRESHOLD {
        HealthStatus::Good
    } else {
        HealthStatus::NeedsAttention
    };

    let next_action = if requirements.is_empty() {
        NextAction::Extract
    } else if metrics.completeness < 100.0 {
        let covered = covered_requirement_ids(requirements, test_cases).len();
        NextAction::Generate {
            uncovered: requirements.len() - covered,
        }
    } else if metrics.traceability < 100.0 {
        NextAction::Log {
            unlogged: test_cases.iter().filter(|tc| !tc.is_logged()).count(),
        }
    } else {
        NextAction::Done
    };

    ProjectHealth {
        status,
        readiness,
        next_action_message: next_action.message(),
        next_action,
    }
}

/// Requirement counts per category, in a fixed category order. Categories
/// with no requirements are omitted.
pub fn requirements_by_category(requirements: &[Requirement]) -> Vec<ChartPoint> {
    let mut counts: BTreeMap<RequirementCategory, usize> = BTreeMap::new();
    for req in requirements {
        *counts.entry(req.category).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(category, count)| ChartPoint {
            label: category.as_str(),
            count,
        })
        .collect()
}

/// Test-case counts per type. Types with no test cases are omitted.
pub fn test_cases_by_type(test_cases: &[TestCase]) -> Vec<ChartPoint> {
    let mut counts: BTreeMap<TestCaseType, usize> = BTreeMap::new();
    for tc in test_cases {
        *counts.entry(tc.case_type).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(case_type, count)| ChartPoint {
            label: case_type.as_str(),
            count,
        })
        .collect()
}

/// Map each requirement to the ids of the test cases that verify it.
pub fn traceability_matrix(
    requirements: &[Requirement],
    test_cases: &[TestCase],
) -> Vec<TraceabilityRow> {
    requirements
        .iter()
        .map(|req| TraceabilityRow {
            requirement_id: req.id.clone(),
            description: req.description.clone(),
            category: req.category,
            test_case_ids: test_cases
                .iter()
                .filter(|tc| tc.requirement_id == req.id)
                .map(|tc| tc.id.clone())
                .collect(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
