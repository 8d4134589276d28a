use docintake_core::credentials::{MSG_INVALID_BASE_URL, MSG_NOT_CONFIGURED};

/// Fallback message when issue creation fails without `errorMessages`.
pub const MSG_CREATE_FAILED: &str = "Failed to create Jira issue";

/// Errors from the Jira client.
#[derive(Debug, thiserror::Error)]
pub enum JiraError {
    /// One or more credential fields are empty.
    #[error("{}", MSG_NOT_CONFIGURED)]
    MissingCredentials,

    /// The base URL is not an absolute http(s) URL.
    #[error("{}", MSG_INVALID_BASE_URL)]
    InvalidBaseUrl,

    /// Jira answered with a non-2xx status.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// `errorMessages` from the response, or a fallback.
        message: String,
    },

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request to Jira failed: {0}")]
    Request(#[from] reqwest::Error),
}
