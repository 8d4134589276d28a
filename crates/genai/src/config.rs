/// Default Generative Language API base URL.
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model name.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Default timeout for a single model call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 90;

/// Generative model configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Base URL of the Generative Language REST API.
    pub api_url: String,
    /// Model name, e.g. `gemini-2.0-flash`.
    pub model: String,
    /// API key. `None` leaves the service running but every flow call fails.
    pub api_key: Option<String>,
    /// Per-call HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl ModelConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                              | Default                                            |
    /// |--------------------------------------|----------------------------------------------------|
    /// | `GEMINI_API_KEY` / `GOOGLE_API_KEY`  | unset                                              |
    /// | `GENAI_API_URL`                      | `https://generativelanguage.googleapis.com/v1beta` |
    /// | `GENAI_MODEL`                        | `gemini-2.0-flash`                                 |
    /// | `GENAI_TIMEOUT_SECS`                 | `90`                                               |
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .ok()
            .filter(|k| !k.trim().is_empty());

        let api_url = std::env::var("GENAI_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.into())
            .trim_end_matches('/')
            .to_string();

        let model = std::env::var("GENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        let timeout_secs: u64 = std::env::var("GENAI_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("GENAI_TIMEOUT_SECS must be a valid u64");

        Self {
            api_url,
            model,
            api_key,
            timeout_secs,
        }
    }
}
