//! HTTP client for the submission endpoint.

use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

use intake_core::response::SubmitReply;
use intake_core::submission::ProposalSubmission;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8787/api/submit";

/// Shown when the endpoint refuses without an `error` message of its own.
pub const FALLBACK_FAILURE_MESSAGE: &str = "Failed to submit proposal. Please try again.";

/// A created ticket, as reported by the endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub jira_key: String,
    pub jira_url: String,
}

#[derive(Debug, Error)]
pub enum SubmitFailure {
    /// The endpoint answered but did not report success.
    #[error("{message}")]
    Rejected {
        status: u16,
        message: String,
        /// Per-field messages from a 400 reply, if any.
        errors: Vec<String>,
    },

    /// The request failed or the reply could not be read.
    #[error("Network error: {0}.")]
    Network(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct SubmitClient {
    client: Client,
    endpoint: String,
}

impl SubmitClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST one submission. Success needs both a 2xx status and
    /// `success: true` in the body.
    pub async fn submit(
        &self,
        submission: &ProposalSubmission,
    ) -> Result<SubmitReceipt, SubmitFailure> {
        debug!(endpoint = %self.endpoint, "Sending proposal");

        let response = self
            .client
            .post(&self.endpoint)
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        let reply: SubmitReply = response.json().await?;

        if status.is_success() && reply.success {
            return Ok(SubmitReceipt {
                jira_key: reply.jira_key.unwrap_or_default(),
                jira_url: reply.jira_url.unwrap_or_default(),
            });
        }

        warn!(status = status.as_u16(), error = ?reply.error, "Proposal was not accepted");
        Err(SubmitFailure::Rejected {
            status: status.as_u16(),
            message: reply
                .error
                .unwrap_or_else(|| FALLBACK_FAILURE_MESSAGE.to_string()),
            errors: reply.errors.unwrap_or_default(),
        })
    }
}
