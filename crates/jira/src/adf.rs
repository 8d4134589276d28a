//! Atlassian Document Format rendering of a test case.

use docintake_core::test_case::TestCase;
use serde_json::{json, Value};

fn text(value: &str) -> Value {
    json!({ "type": "text", "text": value })
}

fn strong(value: &str) -> Value {
    json!({ "type": "text", "text": value, "marks": [{ "type": "strong" }] })
}

fn paragraph(content: Vec<Value>) -> Value {
    json!({ "type": "paragraph", "content": content })
}

/// Build the issue description for a test case.
///
/// ADF rejects empty text nodes and empty lists, so blank expected
/// results are omitted and the list is left out when there are no steps.
pub fn test_case_description(test_case: &TestCase) -> Value {
    let mut content = vec![
        paragraph(vec![text(&format!(
            "Test case for requirement: {}",
            test_case.requirement_id
        ))]),
        paragraph(vec![text("Test Steps:")]),
    ];

    if !test_case.test_steps.is_empty() {
        let items: Vec<Value> = test_case
            .test_steps
            .iter()
            .map(|step| {
                let mut nodes = vec![strong(&format!("{} -> ", step.action))];
                if !step.expected_result.is_empty() {
                    nodes.push(text(&step.expected_result));
                }
                json!({ "type": "listItem", "content": [paragraph(nodes)] })
            })
            .collect();
        content.push(json!({ "type": "orderedList", "content": items }));
    }

    json!({ "type": "doc", "version": 1, "content": content })
}

#[cfg(test)]
mod tests {
    use docintake_core::test_case::{TestCaseType, TestStep};

    use super::*;

    fn case(steps: Vec<TestStep>) -> TestCase {
        TestCase {
            id: "TC-1".to_string(),
            title: "Lockout".to_string(),
            requirement_id: "REQ-004".to_string(),
            preconditions: vec![],
            test_steps: steps,
            test_data: vec![],
            case_type: TestCaseType::Negative,
            compliance: vec![],
            jira_key: None,
            jira_url: None,
        }
    }

    #[test]
    fn steps_render_as_ordered_list_with_bold_action() {
        let doc = test_case_description(&case(vec![TestStep {
            step: 1,
            action: "Enter wrong password 5 times".to_string(),
            expected_result: "Account locked".to_string(),
        }]));

        assert_eq!(doc["type"], "doc");
        assert_eq!(
            doc["content"][0]["content"][0]["text"],
            "Test case for requirement: REQ-004"
        );
        assert_eq!(doc["content"][1]["content"][0]["text"], "Test Steps:");
        let item = &doc["content"][2]["content"][0]["content"][0]["content"];
        assert_eq!(item[0]["text"], "Enter wrong password 5 times -> ");
        assert_eq!(item[0]["marks"][0]["type"], "strong");
        assert_eq!(item[1]["text"], "Account locked");
    }

    #[test]
    fn no_steps_means_no_list() {
        let doc = test_case_description(&case(vec![]));
        assert_eq!(doc["content"].as_array().unwrap().len(), 2);
    }
}
