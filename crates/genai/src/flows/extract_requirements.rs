//! Requirement extraction.

use docintake_core::requirement::{Requirement, RequirementCategory};
use serde::{Deserialize, Serialize};

use super::{check_document_text, enum_schema};
use crate::flow::{Flow, FlowError, FlowRunner};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractRequirementsInput {
    pub document_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractRequirementsOutput {
    pub requirements: Vec<Requirement>,
}

pub struct ExtractRequirements;

impl Flow for ExtractRequirements {
    const NAME: &'static str = "extractRequirements";

    type Input = ExtractRequirementsInput;
    type Output = ExtractRequirementsOutput;

    fn validate_input(input: &Self::Input) -> Result<(), String> {
        check_document_text(&input.document_text)
    }

    fn render_prompt(input: &Self::Input) -> String {
        format!(
            "You are an expert systems analyst. Extract every requirement stated in the document below.\n\
             \n\
             A requirement is any statement of what the system shall, must, should, or will do. \
             Give each one an identifier (e.g. REQ-001), its full text, and one category:\n\
             - Functional: what the system does.\n\
             - Non-Functional: how well it does it (performance, security, reliability).\n\
             - Compliance: obligations from a standard, law, or regulation.\n\
             \n\
             Respond with JSON matching the requested schema.\n\
             \n\
             Document Text:\n{}",
            input.document_text
        )
    }

    fn output_schema() -> serde_json::Value {
        let categories: Vec<&str> = RequirementCategory::ALL.iter().map(|c| c.as_str()).collect();
        serde_json::json!({
            "type": "OBJECT",
            "properties": {
                "requirements": {
                    "type": "ARRAY",
                    "description": "Every requirement found in the document.",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "id": { "type": "STRING", "description": "Identifier such as REQ-001." },
                            "description": { "type": "STRING", "description": "Full requirement statement." },
                            "category": enum_schema(&categories, "Requirement category."),
                        },
                        "required": ["id", "description", "category"],
                    },
                },
            },
            "required": ["requirements"],
        })
    }

    fn finalize(_input: &Self::Input, mut output: Self::Output) -> Result<Self::Output, String> {
        let before = output.requirements.len();
        output
            .requirements
            .retain(|r| !r.description.trim().is_empty());
        if output.requirements.len() != before {
            tracing::warn!(
                dropped = before - output.requirements.len(),
                "Dropped requirements with empty descriptions"
            );
        }
        for req in &mut output.requirements {
            req.description = req.description.trim().to_string();
        }
        Ok(output)
    }
}

impl FlowRunner {
    /// Extract requirements from document text.
    pub async fn extract_requirements(
        &self,
        document_text: &str,
    ) -> Result<Vec<Requirement>, FlowError> {
        let input = ExtractRequirementsInput {
            document_text: document_text.to_string(),
        };
        Ok(self.run::<ExtractRequirements>(&input).await?.requirements)
    }
}
