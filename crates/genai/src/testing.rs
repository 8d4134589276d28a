//! In-memory [`GenerativeModel`] for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::model::{GenerateRequest, GenerativeModel, ModelError};

/// Replays queued replies in order and records every request it sees.
///
/// When the queue is empty, `generate` returns [`ModelError::EmptyResponse`].
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, (u16, String)>>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply containing `value` serialized as JSON.
    pub fn reply_json(&self, value: serde_json::Value) -> &Self {
        self.reply_text(value.to_string())
    }

    /// Queue a successful reply with raw text.
    pub fn reply_text(&self, text: impl Into<String>) -> &Self {
        self.replies
            .lock()
            .expect("scripted replies lock")
            .push_back(Ok(text.into()));
        self
    }

    /// Queue an API failure.
    pub fn reply_error(&self, status: u16, body: impl Into<String>) -> &Self {
        self.replies
            .lock()
            .expect("scripted replies lock")
            .push_back(Err((status, body.into())));
        self
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().expect("scripted requests lock").clone()
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate(&self, request: GenerateRequest) -> Result<String, ModelError> {
        self.requests
            .lock()
            .expect("scripted requests lock")
            .push(request);
        match self
            .replies
            .lock()
            .expect("scripted replies lock")
            .pop_front()
        {
            Some(Ok(text)) => Ok(text),
            Some(Err((status, body))) => Err(ModelError::Api { status, body }),
            None => Err(ModelError::EmptyResponse),
        }
    }
}
