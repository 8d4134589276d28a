//! Question answering over a single document.

use serde::{Deserialize, Serialize};

use super::check_document_text;
use crate::flow::{Flow, FlowError, FlowRunner};

/// Maximum query length in characters.
pub const MAX_QUERY_CHARS: usize = 2_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentQaInput {
    pub document_text: String,
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentQaOutput {
    pub answer: String,
}

pub struct DocumentQa;

impl Flow for DocumentQa {
    const NAME: &'static str = "documentQa";

    type Input = DocumentQaInput;
    type Output = DocumentQaOutput;

    fn validate_input(input: &Self::Input) -> Result<(), String> {
        if input.query.trim().is_empty() {
            return Err("query must not be empty".to_string());
        }
        if input.query.chars().count() > MAX_QUERY_CHARS {
            return Err(format!("query exceeds {MAX_QUERY_CHARS} characters"));
        }
        check_document_text(&input.document_text)
    }

    fn render_prompt(input: &Self::Input) -> String {
        format!(
            "Answer the question using only the document below. If the document does not \
             contain the answer, say that the information is not in the document.\n\
             \n\
             Question: {}\n\
             \n\
             Document Text:\n{}",
            input.query.trim(),
            input.document_text
        )
    }

    fn output_schema() -> serde_json::Value {
        serde_json::json!({
            "type": "OBJECT",
            "properties": {
                "answer": { "type": "STRING" },
            },
            "required": ["answer"],
        })
    }

    fn finalize(_input: &Self::Input, output: Self::Output) -> Result<Self::Output, String> {
        let answer = output.answer.trim();
        if answer.is_empty() {
            return Err("model returned an empty answer".to_string());
        }
        Ok(DocumentQaOutput {
            answer: answer.to_string(),
        })
    }
}

impl FlowRunner {
    /// Answer `query` from `document_text`.
    pub async fn answer_question(
        &self,
        document_text: &str,
        query: &str,
    ) -> Result<String, FlowError> {
        let input = DocumentQaInput {
            document_text: document_text.to_string(),
            query: query.to_string(),
        };
        Ok(self.run::<DocumentQa>(&input).await?.answer)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;

    use super::*;
    use crate::testing::ScriptedModel;

    #[tokio::test]
    async fn answer_is_trimmed() {
        let model = Arc::new(ScriptedModel::new());
        model.reply_json(serde_json::json!({"answer": "  Five attempts.\n"}));
        let runner = FlowRunner::new(model.clone());

        let answer = runner
            .answer_question("Accounts lock after five attempts.", "When do accounts lock?")
            .await
            .unwrap();

        assert_eq!(answer, "Five attempts.");
        assert!(model.requests()[0]
            .prompt
            .contains("Question: When do accounts lock?"));
    }

    #[tokio::test]
    async fn not_in_document_is_a_valid_answer() {
        let model = Arc::new(ScriptedModel::new());
        model.reply_json(serde_json::json!({"answer": "The information is not in the document."}));
        let runner = FlowRunner::new(model);

        assert!(runner.answer_question("doc", "what?").await.is_ok());
    }

    #[tokio::test]
    async fn blank_query_and_empty_answer_are_rejected() {
        let model = Arc::new(ScriptedModel::new());
        model.reply_json(serde_json::json!({"answer": " "}));
        let runner = FlowRunner::new(model);

        assert_matches!(
            runner.answer_question("doc", " ").await,
            Err(FlowError::InvalidInput { .. })
        );
        assert_matches!(
            runner.answer_question("doc", "q").await,
            Err(FlowError::InvalidOutput { .. })
        );
    }
}
