use std::sync::Arc;

use docintake_genai::flow::FlowRunner;
use tokio::sync::RwLock;

use crate::config::ServerConfig;
use crate::workspace::Workspace;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The single shared workspace. Never held across a model or Jira call.
    pub workspace: Arc<RwLock<Workspace>>,
    /// Runs generative-model flows.
    pub flows: FlowRunner,
    /// Pooled HTTP client for Jira calls.
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: ServerConfig, flows: FlowRunner, http: reqwest::Client) -> Self {
        let workspace = Workspace::new(config.activity_log_limit);
        Self {
            config: Arc::new(config),
            workspace: Arc::new(RwLock::new(workspace)),
            flows,
            http,
        }
    }
}
