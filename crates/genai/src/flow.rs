//! Schema-typed flow contract and runner.
//!
//! A [`Flow`] pairs an input type with an output type, renders a prompt,
//! and declares the JSON schema the model's output must follow. The
//! [`FlowRunner`] validates both directions around a single model call.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::model::{GenerateRequest, GenerativeModel, ModelError};

/// A named prompt invocation with typed input and output.
pub trait Flow {
    /// Flow name used in logs and errors.
    const NAME: &'static str;

    type Input: Serialize + Send + Sync;
    type Output: DeserializeOwned + Serialize + Send;

    /// Reject inputs that must never reach the model.
    fn validate_input(input: &Self::Input) -> Result<(), String>;

    /// Render the prompt for this input.
    fn render_prompt(input: &Self::Input) -> String;

    /// JSON schema (Gemini OpenAPI subset) of [`Flow::Output`].
    fn output_schema() -> serde_json::Value;

    /// Check and normalise the parsed output.
    fn finalize(input: &Self::Input, output: Self::Output) -> Result<Self::Output, String>;
}

/// Errors from running a flow.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("Invalid input for {flow}: {message}")]
    InvalidInput { flow: &'static str, message: String },

    #[error("Model call for {flow} failed: {source}")]
    Model {
        flow: &'static str,
        #[source]
        source: ModelError,
    },

    #[error("Invalid output from {flow}: {message}")]
    InvalidOutput { flow: &'static str, message: String },
}

impl FlowError {
    pub fn flow(&self) -> &'static str {
        match self {
            Self::InvalidInput { flow, .. }
            | Self::Model { flow, .. }
            | Self::InvalidOutput { flow, .. } => flow,
        }
    }
}

/// Runs flows against a shared [`GenerativeModel`].
#[derive(Clone)]
pub struct FlowRunner {
    model: Arc<dyn GenerativeModel>,
}

impl FlowRunner {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Validate, render, generate, parse, and finalize.
    pub async fn run<F: Flow>(&self, input: &F::Input) -> Result<F::Output, FlowError> {
        F::validate_input(input).map_err(|message| FlowError::InvalidInput {
            flow: F::NAME,
            message,
        })?;

        let request = GenerateRequest {
            flow: F::NAME,
            prompt: F::render_prompt(input),
            response_schema: F::output_schema(),
        };

        let started = std::time::Instant::now();
        let text = self
            .model
            .generate(request)
            .await
            .map_err(|source| {
                tracing::warn!(flow = F::NAME, error = %source, "Model call failed");
                FlowError::Model {
                    flow: F::NAME,
                    source,
                }
            })?;

        let output: F::Output =
            serde_json::from_str(strip_code_fence(&text)).map_err(|e| {
                tracing::warn!(flow = F::NAME, error = %e, "Model output did not match schema");
                FlowError::InvalidOutput {
                    flow: F::NAME,
                    message: e.to_string(),
                }
            })?;

        let output = F::finalize(input, output).map_err(|message| FlowError::InvalidOutput {
            flow: F::NAME,
            message,
        })?;

        tracing::info!(
            flow = F::NAME,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Flow completed"
        );
        Ok(output)
    }
}

/// Strip a surrounding Markdown code fence (```json ... ```) if present.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    // Drop the info string (e.g. `json`) on the opening line.
    match rest.split_once('\n') {
        Some((info, body)) if !info.contains('{') && !info.contains('[') => body.trim(),
        _ => rest.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_fences_are_stripped() {
        assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fence("  {\"a\":1}\n"), "{\"a\":1}");
    }
}
