//! CSV and Markdown exports of the current test-case set.

use crate::document::Document;
use crate::metrics::{audit_metrics, compliance_confidence, traceability_matrix};
use crate::requirement::Requirement;
use crate::test_case::{TestCase, TestStep};
use crate::types::Timestamp;

/// Column headers of the test-case CSV export.
pub const TEST_CASE_CSV_HEADERS: &[&str] = &[
    "ID",
    "Title",
    "Requirement ID",
    "Type",
    "Preconditions",
    "Test Steps",
    "Test Data",
    "Compliance",
    "Jira Key",
    "Jira URL",
];

const LIST_SEPARATOR: &str = "; ";

// ---------------------------------------------------------------------------
// CSV helpers
// ---------------------------------------------------------------------------

/// Escape a value for CSV: wrap in quotes if it contains comma, quote, or newline.
pub fn csv_escape(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn format_steps(steps: &[TestStep]) -> String {
    steps
        .iter()
        .map(|s| format!("{}. {} -> {}", s.step, s.action, s.expected_result))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the test-case CSV export. Rows are separated by `\n`.
pub fn test_cases_csv(test_cases: &[TestCase]) -> String {
    let mut lines = Vec::with_capacity(test_cases.len() + 1);
    lines.push(TEST_CASE_CSV_HEADERS.join(","));

    for tc in test_cases {
        let compliance: Vec<&str> = tc.compliance.iter().map(|c| c.as_str()).collect();
        let row = [
            tc.id.clone(),
            tc.title.clone(),
            tc.requirement_id.clone(),
            tc.case_type.as_str().to_string(),
            tc.preconditions.join(LIST_SEPARATOR),
            format_steps(&tc.test_steps),
            tc.test_data.join(LIST_SEPARATOR),
            compliance.join(LIST_SEPARATOR),
            tc.jira_key.clone().unwrap_or_default(),
            tc.jira_url.clone().unwrap_or_default(),
        ];
        lines.push(
            row.iter()
                .map(|v| csv_escape(v))
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Markdown report
// ---------------------------------------------------------------------------

/// Escape a value for a Markdown table cell.
fn md_cell(value: &str) -> String {
    value.replace('|', "\\|").replace(['\r', '\n'], " ")
}

/// Render the compliance and traceability report for a document.
pub fn traceability_report(
    document: Option<&Document>,
    requirements: &[Requirement],
    test_cases: &[TestCase],
    generated_at: Timestamp,
) -> String {
    let mut out = String::new();
    let metrics = audit_metrics(requirements, test_cases);

    out.push_str("# Compliance & Traceability Report\n\n");
    match document {
        Some(doc) => out.push_str(&format!("Document: {}\n\n", md_cell(&doc.name))),
        None => out.push_str("Document: (none selected)\n\n"),
    }
    out.push_str(&format!("Generated: {}\n\n", generated_at.to_rfc3339()));

    out.push_str("## Audit Metrics\n\n");
    out.push_str(&format!(
        "- Completeness: {:.0}%\n- Traceability: {:.0}%\n- Testing Maturity: {:.1}\n- Audit Readiness: {:.0}%\n- Compliance Confidence: {:.0}%\n\n",
        metrics.completeness,
        metrics.traceability,
        metrics.maturity,
        metrics.readiness,
        compliance_confidence(requirements, test_cases),
    ));

    out.push_str("## Traceability Matrix\n\n");
    out.push_str("| Requirement ID | Category | Description | Test Case(s) |\n");
    out.push_str("|---|---|---|---|\n");
    for row in traceability_matrix(requirements, test_cases) {
        let cases = if row.test_case_ids.is_empty() {
            "(none)".to_string()
        } else {
            row.test_case_ids.join(", ")
        };
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            md_cell(&row.requirement_id),
            row.category.as_str(),
            md_cell(&row.description),
            md_cell(&cases),
        ));
    }

    out.push_str("\n## Compliance Mapping\n\n");
    out.push_str("| Test Case ID | Title | Requirement ID | Standards | Jira |\n");
    out.push_str("|---|---|---|---|---|\n");
    for tc in test_cases {
        let standards = if tc.compliance.is_empty() {
            "N/A".to_string()
        } else {
            tc.compliance
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            md_cell(&tc.id),
            md_cell(&tc.title),
            md_cell(&tc.requirement_id),
            standards,
            md_cell(tc.jira_key.as_deref().unwrap_or("-")),
        ));
    }

    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirement::RequirementCategory;
    use crate::test_case::{ComplianceStandard, TestCaseType};

    fn sample_case() -> TestCase {
        TestCase {
            id: "TC-REQ-001-01".to_string(),
            title: "Login, with \"MFA\"".to_string(),
            requirement_id: "REQ-001".to_string(),
            preconditions: vec!["User exists".to_string(), "MFA enrolled".to_string()],
            test_steps: vec![
                TestStep {
                    step: 1,
                    action: "Enter password".to_string(),
                    expected_result: "Prompted for code".to_string(),
                },
                TestStep {
                    step: 2,
                    action: "Enter code".to_string(),
                    expected_result: "Logged in".to_string(),
                },
            ],
            test_data: vec!["user@example.com".to_string()],
            case_type: TestCaseType::Positive,
            compliance: vec![ComplianceStandard::Hipaa],
            jira_key: Some("FIRE-7".to_string()),
            jira_url: None,
        }
    }

    #[test]
    fn csv_escape_quotes_special_characters() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_escape("line1\nline2"), "\"line1\nline2\"");
        assert_eq!(csv_escape("cr\r"), "\"cr\r\"");
        assert_eq!(csv_escape(""), "");
    }

    #[test]
    fn csv_has_header_and_escaped_row() {
        let csv = test_cases_csv(&[sample_case()]);
        let (header, row) = csv.split_once('\n').unwrap();
        assert_eq!(header, TEST_CASE_CSV_HEADERS.join(","));
        assert!(row.starts_with("TC-REQ-001-01,\"Login, with \"\"MFA\"\"\",REQ-001,Positive,"));
        assert!(row.contains("User exists; MFA enrolled"));
        assert!(row.contains("\"1. Enter password -> Prompted for code\n2. Enter code -> Logged in\""));
        assert!(row.contains(",HIPAA,FIRE-7,"));
        assert!(row.ends_with(','));
    }

    #[test]
    fn csv_of_empty_list_is_header_only() {
        assert_eq!(test_cases_csv(&[]), TEST_CASE_CSV_HEADERS.join(","));
    }

    #[test]
    fn report_contains_matrix_and_compliance_rows() {
        let reqs = vec![
            Requirement {
                id: "REQ-001".to_string(),
                description: "Login | MFA".to_string(),
                category: RequirementCategory::Compliance,
            },
            Requirement {
                id: "REQ-002".to_string(),
                description: "Logout".to_string(),
                category: RequirementCategory::Functional,
            },
        ];
        let report = traceability_report(None, &reqs, &[sample_case()], chrono::Utc::now());

        assert!(report.starts_with("# Compliance & Traceability Report"));
        assert!(report.contains("Document: (none selected)"));
        assert!(report.contains("| REQ-001 | Compliance | Login \\| MFA | TC-REQ-001-01 |"));
        assert!(report.contains("| REQ-002 | Functional | Logout | (none) |"));
        assert!(report.contains("| HIPAA | FIRE-7 |"));
        assert!(report.contains("- Completeness: 50%"));
        assert!(report.contains("- Compliance Confidence: 100%"));
    }
}
