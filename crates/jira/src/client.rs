//! REST client for the Jira endpoints used by proposal intake.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;

use intake_core::issue::IssuePayload;

use crate::credentials::JiraCredentials;

/// Default timeout for a single Jira request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors from the Jira REST layer.
#[derive(Debug, thiserror::Error)]
pub enum JiraError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Jira returned a non-2xx status code.
    #[error("Jira API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging. Never shown to end users.
        body: String,
    },

    /// The caller's deadline for the Jira exchange ran out.
    #[error("Jira did not answer within {0:?}")]
    TimedOut(Duration),
}

/// Coarse classification of a [`JiraError`], used to pick a response code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JiraErrorKind {
    /// Credentials were refused (401 / 403).
    Auth,
    /// Jira could not be reached or is failing (network, timeout, 429, 5xx).
    Unavailable,
    /// Jira understood the request and refused it (other 4xx, bad body).
    Rejected,
}

impl JiraError {
    pub fn kind(&self) -> JiraErrorKind {
        match self {
            JiraError::Request(err) if err.is_decode() => JiraErrorKind::Rejected,
            JiraError::Request(_) | JiraError::TimedOut(_) => JiraErrorKind::Unavailable,
            JiraError::Api { status, .. } => match *status {
                401 | 403 => JiraErrorKind::Auth,
                429 | 500..=599 => JiraErrorKind::Unavailable,
                _ => JiraErrorKind::Rejected,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Subset of `GET /rest/api/3/myself`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraUser {
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
}

/// Response of `POST /rest/api/3/issue`.
#[derive(Debug, Deserialize)]
struct CreateIssueResponse {
    id: String,
    key: String,
}

/// A freshly created issue with its browse URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedIssue {
    pub id: String,
    pub key: String,
    pub url: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for one Jira site.
pub struct JiraClient {
    client: reqwest::Client,
    base_url: String,
    auth_header: String,
}

impl JiraClient {
    /// Create a client for `base_url` (e.g. `https://example.atlassian.net`).
    pub fn new(
        base_url: &str,
        credentials: &JiraCredentials,
        timeout: Duration,
    ) -> Result<Self, JiraError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url, credentials))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        credentials: &JiraCredentials,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header: credentials.basic_auth_header(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Human-facing URL of an issue.
    pub fn browse_url(&self, key: &str) -> String {
        format!("{}/browse/{key}", self.base_url)
    }

    /// Fetch the account the credentials belong to.
    pub async fn myself(&self) -> Result<JiraUser, JiraError> {
        let response = self
            .client
            .get(format!("{}/rest/api/3/myself", self.base_url))
            .header(AUTHORIZATION, &self.auth_header)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Create an issue and return its id, key and browse URL.
    pub async fn create_issue(&self, payload: &IssuePayload) -> Result<CreatedIssue, JiraError> {
        let response = self
            .client
            .post(format!("{}/rest/api/3/issue", self.base_url))
            .header(AUTHORIZATION, &self.auth_header)
            .header(ACCEPT, "application/json")
            .json(payload)
            .send()
            .await?;

        let created: CreateIssueResponse = Self::parse_response(response).await?;
        let url = self.browse_url(&created.key);

        Ok(CreatedIssue {
            id: created.id,
            key: created.key,
            url,
        })
    }

    // ---- private helpers ----

    /// Return the response unchanged on success, or an
    /// [`JiraError::Api`] carrying the status and body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, JiraError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(JiraError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, JiraError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
