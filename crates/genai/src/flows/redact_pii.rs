//! PII detection and redaction.
//!
//! The model returns both its findings and a redacted copy of the text.
//! Placeholders are then enforced locally so every finding ends up as
//! `[REDACTED_{CATEGORY}]` regardless of what the model wrote.

use docintake_core::redaction::{
    enforce_placeholders, normalize_unknown_placeholders, PiiCategory, PiiFinding,
};
use serde::{Deserialize, Serialize};

use super::{check_document_text, enum_schema};
use crate::flow::{Flow, FlowError, FlowRunner};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactPiiInput {
    pub document_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactPiiOutput {
    #[serde(default)]
    pub findings: Vec<PiiFinding>,
    #[serde(default)]
    pub redacted_text: String,
}

pub struct RedactPii;

impl Flow for RedactPii {
    const NAME: &'static str = "redactPii";

    type Input = RedactPiiInput;
    type Output = RedactPiiOutput;

    fn validate_input(input: &Self::Input) -> Result<(), String> {
        check_document_text(&input.document_text)
    }

    fn render_prompt(input: &Self::Input) -> String {
        format!(
            "You are a privacy officer. Find all personally identifiable information in the \
             document below: names of people, locations and addresses, organization names, \
             contact details such as phone numbers and email addresses, and identifiers such \
             as patient, account, or license numbers.\n\
             \n\
             List each finding with one category: PERSON, LOCATION, ORGANIZATION, CONTACT, ID, \
             or OTHER. Then return the full text with every finding replaced by \
             [REDACTED_CATEGORY], for example [REDACTED_PERSON]. Leave all other text unchanged.\n\
             \n\
             Respond with JSON matching the requested schema.\n\
             \n\
             Document Text:\n{}",
            input.document_text
        )
    }

    fn output_schema() -> serde_json::Value {
        let categories: Vec<&str> = PiiCategory::ALL.iter().map(|c| c.as_str()).collect();
        serde_json::json!({
            "type": "OBJECT",
            "properties": {
                "findings": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "finding": { "type": "STRING", "description": "Exact text as it appears." },
                            "category": enum_schema(&categories, "PII category."),
                        },
                        "required": ["finding", "category"],
                    },
                },
                "redactedText": { "type": "STRING" },
            },
            "required": ["findings", "redactedText"],
        })
    }

    fn finalize(input: &Self::Input, output: Self::Output) -> Result<Self::Output, String> {
        let base = if output.redacted_text.trim().is_empty() {
            input.document_text.as_str()
        } else {
            output.redacted_text.as_str()
        };
        let redacted_text =
            normalize_unknown_placeholders(&enforce_placeholders(base, &output.findings));

        Ok(RedactPiiOutput {
            findings: output.findings,
            redacted_text,
        })
    }
}

impl FlowRunner {
    /// Find and redact PII in document text.
    pub async fn redact_pii(&self, document_text: &str) -> Result<RedactPiiOutput, FlowError> {
        let input = RedactPiiInput {
            document_text: document_text.to_string(),
        };
        self.run::<RedactPii>(&input).await
    }
}
