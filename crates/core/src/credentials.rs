//! Issue-tracker credentials supplied by the user.
//!
//! Credentials are only checked for presence and for an http(s) base URL.
//! Whether they actually authenticate is discovered on the first tracker
//! call.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::CoreError;

pub const MSG_NOT_CONFIGURED: &str = "Jira credentials are not fully provided.";
pub const MSG_INVALID_BASE_URL: &str = "The provided Jira Base URL is not a valid URL.";

/// Base URL, account and project used to talk to the issue tracker.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct IssueTrackerCredentials {
    #[validate(
        url(message = "The provided Jira Base URL is not a valid URL."),
        custom(function = "http_scheme")
    )]
    pub base_url: String,
    pub email: String,
    pub api_token: String,
    pub project_key: String,
}

impl IssueTrackerCredentials {
    /// True only when every field has a value.
    pub fn is_configured(&self) -> bool {
        [
            &self.base_url,
            &self.email,
            &self.api_token,
            &self.project_key,
        ]
        .iter()
        .all(|v| !v.trim().is_empty())
    }

    /// Check presence first, then shape.
    pub fn check(&self) -> Result<(), CoreError> {
        if !self.is_configured() {
            return Err(CoreError::Validation(MSG_NOT_CONFIGURED.to_string()));
        }
        self.validate()
            .map_err(|_| CoreError::Validation(MSG_INVALID_BASE_URL.to_string()))
    }

    /// A view safe to return to clients: the API token is never echoed.
    pub fn masked(&self) -> MaskedCredentials {
        MaskedCredentials {
            base_url: self.base_url.clone(),
            email: self.email.clone(),
            project_key: self.project_key.clone(),
            has_api_token: !self.api_token.is_empty(),
            is_configured: self.is_configured(),
        }
    }
}

/// Credentials as reported back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskedCredentials {
    pub base_url: String,
    pub email: String,
    pub project_key: String,
    pub has_api_token: bool,
    pub is_configured: bool,
}

/// Reject URLs whose scheme is not http or https.
fn http_scheme(value: &str) -> Result<(), ValidationError> {
    let lower = value.to_ascii_lowercase();
    let rest = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() && !host.starts_with('/') => Ok(()),
        _ => Err(ValidationError::new("http_scheme")
            .with_message(MSG_INVALID_BASE_URL.into())),
    }
}
