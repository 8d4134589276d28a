//! The generative-model seam.
//!
//! Flows only ever talk to a [`GenerativeModel`]. The production
//! implementation is [`crate::gemini::GeminiModel`]; tests substitute a
//! scripted model.

use async_trait::async_trait;

/// A single structured-output generation request.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Name of the flow issuing the request (for logs).
    pub flow: &'static str,
    /// Fully rendered prompt text.
    pub prompt: String,
    /// Schema the model's JSON output must conform to.
    pub response_schema: serde_json::Value,
}

/// Errors from the model transport layer.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The model API returned a non-2xx status code.
    #[error("Model API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The prompt was refused by the provider's safety filters.
    #[error("Prompt blocked by the model provider: {0}")]
    Blocked(String),

    /// The response contained no candidate text.
    #[error("Model returned no output")]
    EmptyResponse,

    /// No API key is configured.
    #[error("Generative model is not configured (set GEMINI_API_KEY)")]
    NotConfigured,
}

/// Prompt-to-structured-output service.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Generate a response and return the raw JSON text the model produced.
    async fn generate(&self, request: GenerateRequest) -> Result<String, ModelError>;
}
