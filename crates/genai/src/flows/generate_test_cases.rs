//! Test-case generation from selected requirements.

use std::collections::HashSet;

use docintake_core::requirement::Requirement;
use docintake_core::test_case::{renumber_steps, TestCase, TestCaseType};
use serde::{Deserialize, Serialize};

use super::{enum_schema, string_array_schema};
use crate::flow::{Flow, FlowError, FlowRunner};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateTestCasesInput {
    pub requirements: Vec<Requirement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTestCasesOutput {
    pub test_cases: Vec<TestCase>,
}

pub struct GenerateTestCases;

impl Flow for GenerateTestCases {
    const NAME: &'static str = "generateTestCases";

    type Input = GenerateTestCasesInput;
    type Output = GenerateTestCasesOutput;

    fn validate_input(input: &Self::Input) -> Result<(), String> {
        if input.requirements.is_empty() {
            return Err("at least one requirement is required".to_string());
        }
        if let Some(r) = input.requirements.iter().find(|r| r.id.trim().is_empty()) {
            return Err(format!("requirement '{}' has an empty id", r.description));
        }
        Ok(())
    }

    fn render_prompt(input: &Self::Input) -> String {
        let listed = input
            .requirements
            .iter()
            .map(|r| {
                format!(
                    "Requirement ID: {}\nDescription: {}\nCategory: {}",
                    r.id,
                    r.description,
                    r.category.as_str()
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        format!(
            "You are a QA engineer for regulated healthcare software. Write test cases \
             for each requirement listed below.\n\
             \n\
             For every requirement produce positive, negative, and edge-case scenarios \
             where they apply. Each test case needs:\n\
             - id: TC-{{requirement id}}-{{two digit sequence}}, e.g. TC-REQ-001-01\n\
             - title\n\
             - requirementId: the id of the requirement it verifies\n\
             - preconditions\n\
             - testSteps: numbered from 1, each with an action and an expected result\n\
             - testData\n\
             - type: Positive, Negative, or Edge Case\n\
             \n\
             Respond with JSON matching the requested schema.\n\
             \n\
             Requirements:\n{listed}"
        )
    }

    fn output_schema() -> serde_json::Value {
        let types: Vec<&str> = TestCaseType::ALL.iter().map(|t| t.as_str()).collect();
        serde_json::json!({
            "type": "OBJECT",
            "properties": {
                "testCases": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "id": { "type": "STRING" },
                            "title": { "type": "STRING" },
                            "requirementId": { "type": "STRING" },
                            "preconditions": string_array_schema("State required before the first step."),
                            "testSteps": {
                                "type": "ARRAY",
                                "items": {
                                    "type": "OBJECT",
                                    "properties": {
                                        "step": { "type": "INTEGER" },
                                        "action": { "type": "STRING" },
                                        "expectedResult": { "type": "STRING" },
                                    },
                                    "required": ["step", "action", "expectedResult"],
                                },
                            },
                            "testData": string_array_schema("Concrete input values."),
                            "type": enum_schema(&types, "Scenario kind."),
                        },
                        "required": ["id", "title", "requirementId", "testSteps", "type"],
                    },
                },
            },
            "required": ["testCases"],
        })
    }

    fn finalize(input: &Self::Input, output: Self::Output) -> Result<Self::Output, String> {
        let known: HashSet<&str> = input.requirements.iter().map(|r| r.id.as_str()).collect();
        let mut seen = HashSet::new();
        let mut test_cases = Vec::with_capacity(output.test_cases.len());

        for mut tc in output.test_cases {
            if tc.id.trim().is_empty() || tc.title.trim().is_empty() {
                tracing::warn!(test_case_id = %tc.id, "Skipping test case without id or title");
                continue;
            }
            if !seen.insert(tc.id.clone()) {
                tracing::warn!(test_case_id = %tc.id, "Skipping duplicate test case id");
                continue;
            }
            if !known.contains(tc.requirement_id.as_str()) {
                tracing::warn!(
                    test_case_id = %tc.id,
                    requirement_id = %tc.requirement_id,
                    "Test case references a requirement that was not requested"
                );
            }
            renumber_steps(&mut tc.test_steps);
            tc.jira_key = None;
            tc.jira_url = None;
            test_cases.push(tc);
        }

        Ok(GenerateTestCasesOutput { test_cases })
    }
}

impl FlowRunner {
    /// Generate test cases for the given requirements.
    pub async fn generate_test_cases(
        &self,
        requirements: Vec<Requirement>,
    ) -> Result<Vec<TestCase>, FlowError> {
        let input = GenerateTestCasesInput { requirements };
        Ok(self.run::<GenerateTestCases>(&input).await?.test_cases)
    }
}
