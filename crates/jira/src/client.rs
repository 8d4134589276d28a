//! REST calls against a Jira Cloud site.

use docintake_core::credentials::IssueTrackerCredentials;
use docintake_core::test_case::TestCase;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::adf::test_case_description;
use crate::error::{JiraError, MSG_CREATE_FAILED};

/// Issue type used for logged test cases.
pub const ISSUE_TYPE: &str = "Task";

/// Status reported when the issue has no status name.
pub const UNKNOWN_STATUS: &str = "Unknown";

/// HTTP client bound to one Jira site, account and project.
pub struct JiraClient {
    client: reqwest::Client,
    base_url: Url,
    email: String,
    api_token: String,
    project_key: String,
}

impl std::fmt::Debug for JiraClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraClient")
            .field("base_url", &self.base_url.as_str())
            .field("email", &self.email)
            .field("api_token", &"<redacted>")
            .field("project_key", &self.project_key)
            .finish_non_exhaustive()
    }
}

/// An issue created for a test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedIssue {
    pub id: String,
    pub key: String,
    /// Browse URL, `{baseUrl}/browse/{key}`.
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct CreateIssueResponse {
    id: String,
    key: String,
}

#[derive(Debug, Deserialize)]
struct IssueResponse {
    #[serde(default)]
    fields: IssueFields,
}

#[derive(Debug, Default, Deserialize)]
struct IssueFields {
    status: Option<IssueStatus>,
}

#[derive(Debug, Deserialize)]
struct IssueStatus {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(default)]
    error_messages: Vec<String>,
    #[serde(default)]
    errors: serde_json::Map<String, serde_json::Value>,
}

/// Parse and normalise a Jira base URL.
///
/// Accepts only absolute `http`/`https` URLs with a host. A trailing slash
/// is dropped so joined paths never contain `//`.
pub fn validate_base_url(raw: &str) -> Result<Url, JiraError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|_| JiraError::InvalidBaseUrl)?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(JiraError::InvalidBaseUrl);
    }
    Ok(url)
}

impl JiraClient {
    /// Create a client from user credentials.
    ///
    /// Fails with [`JiraError::MissingCredentials`] if any field is empty,
    /// or [`JiraError::InvalidBaseUrl`] if the base URL does not parse.
    pub fn new(
        client: reqwest::Client,
        credentials: &IssueTrackerCredentials,
    ) -> Result<Self, JiraError> {
        if !credentials.is_configured() {
            return Err(JiraError::MissingCredentials);
        }
        let base_url = validate_base_url(&credentials.base_url)?;
        Ok(Self {
            client,
            base_url,
            email: credentials.email.trim().to_string(),
            api_token: credentials.api_token.trim().to_string(),
            project_key: credentials.project_key.trim().to_string(),
        })
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Browse URL of an issue.
    pub fn browse_url(&self, key: &str) -> String {
        format!("{}/browse/{}", self.base_url(), key)
    }

    /// Create a Task for `test_case` in the configured project.
    pub async fn create_issue(&self, test_case: &TestCase) -> Result<CreatedIssue, JiraError> {
        let body = serde_json::json!({
            "fields": {
                "project": { "key": self.project_key },
                "summary": format!("[TC] {}", test_case.title),
                "description": test_case_description(test_case),
                "issuetype": { "name": ISSUE_TYPE },
            }
        });

        let response = self
            .client
            .post(self.api_url(&["issue"]))
            .basic_auth(&self.email, Some(&self.api_token))
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;

        let response = Self::ensure_success(response, || MSG_CREATE_FAILED.to_string()).await?;
        let created: CreateIssueResponse = response.json().await?;

        tracing::info!(
            test_case_id = %test_case.id,
            issue_key = %created.key,
            "Created Jira issue"
        );

        Ok(CreatedIssue {
            url: self.browse_url(&created.key),
            id: created.id,
            key: created.key,
        })
    }

    /// Fetch the current status name of an issue.
    pub async fn issue_status(&self, key: &str) -> Result<String, JiraError> {
        let mut url = self.api_url(&["issue", key]);
        url.query_pairs_mut().append_pair("fields", "status");

        let response = self
            .client
            .get(url)
            .basic_auth(&self.email, Some(&self.api_token))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let response =
            Self::ensure_success(response, || format!("Failed to fetch issue {key}")).await?;
        let issue: IssueResponse = response.json().await?;

        Ok(issue
            .fields
            .status
            .and_then(|s| s.name)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_STATUS.to_string()))
    }

    // ---- private helpers ----

    /// `{base}/rest/api/3/{segments...}`, with each segment percent-encoded.
    fn api_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(["rest", "api", "3"]).extend(segments);
        }
        url
    }

    /// Return the response on 2xx, otherwise a [`JiraError::Api`] carrying
    /// the provider's messages or `fallback`.
    async fn ensure_success(
        response: reqwest::Response,
        fallback: impl FnOnce() -> String,
    ) -> Result<reqwest::Response, JiraError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = provider_message(&body).unwrap_or_else(fallback);
        tracing::warn!(status = status.as_u16(), %message, "Jira request failed");
        Err(JiraError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Messages from a Jira error body: `errorMessages` joined by `", "`, or
/// field errors as `field: message` when there are none.
fn provider_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    let messages: Vec<String> = if parsed.error_messages.is_empty() {
        parsed
            .errors
            .iter()
            .map(|(field, value)| match value.as_str() {
                Some(msg) => format!("{field}: {msg}"),
                None => format!("{field}: {value}"),
            })
            .collect()
    } else {
        parsed.error_messages
    };
    (!messages.is_empty()).then(|| messages.join(", "))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn creds(base_url: &str) -> IssueTrackerCredentials {
        IssueTrackerCredentials {
            base_url: base_url.to_string(),
            email: "qa@example.com".to_string(),
            api_token: "token".to_string(),
            project_key: "FIRE".to_string(),
        }
    }

    #[test]
    fn base_url_must_be_absolute_http() {
        assert!(validate_base_url("https://acme.atlassian.net").is_ok());
        assert!(validate_base_url("http://localhost:8080/jira/").is_ok());
        assert_matches!(validate_base_url("acme.atlassian.net"), Err(JiraError::InvalidBaseUrl));
        assert_matches!(validate_base_url("ftp://acme.net"), Err(JiraError::InvalidBaseUrl));
        assert_matches!(validate_base_url(""), Err(JiraError::InvalidBaseUrl));
    }

    #[test]
    fn empty_field_is_missing_credentials() {
        let mut c = creds("https://acme.atlassian.net");
        c.api_token = " ".to_string();
        assert_matches!(
            JiraClient::new(reqwest::Client::new(), &c),
            Err(JiraError::MissingCredentials)
        );
    }

    #[test]
    fn urls_are_joined_without_double_slashes() {
        let client =
            JiraClient::new(reqwest::Client::new(), &creds("https://acme.atlassian.net/")).unwrap();
        assert_eq!(client.browse_url("FIRE-1"), "https://acme.atlassian.net/browse/FIRE-1");
        assert_eq!(
            client.api_url(&["issue", "FIRE-1"]).as_str(),
            "https://acme.atlassian.net/rest/api/3/issue/FIRE-1"
        );

        let nested =
            JiraClient::new(reqwest::Client::new(), &creds("http://host/jira/")).unwrap();
        assert_eq!(
            nested.api_url(&["issue"]).as_str(),
            "http://host/jira/rest/api/3/issue"
        );
    }

    #[test]
    fn provider_messages_are_joined() {
        assert_eq!(
            provider_message(r#"{"errorMessages":["a","b"],"errors":{}}"#).as_deref(),
            Some("a, b")
        );
        assert_eq!(
            provider_message(r#"{"errorMessages":[],"errors":{"summary":"required"}}"#).as_deref(),
            Some("summary: required")
        );
        assert_eq!(provider_message("<html>"), None);
        assert_eq!(provider_message("{}"), None);
    }
}
