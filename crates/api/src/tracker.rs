//! Seam between the submit handler and the issue tracker.

use async_trait::async_trait;
use intake_core::issue::IssuePayload;
use intake_jira::{CreatedIssue, JiraClient, JiraError, JiraUser};

/// Issue tracker operations the endpoint needs.
///
/// Implemented by [`JiraClient`]; tests substitute a recording fake.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Resolve the account behind the configured credentials.
    async fn current_user(&self) -> Result<JiraUser, JiraError>;

    /// Create one issue.
    async fn create_issue(&self, payload: &IssuePayload) -> Result<CreatedIssue, JiraError>;
}

#[async_trait]
impl IssueTracker for JiraClient {
    async fn current_user(&self) -> Result<JiraUser, JiraError> {
        self.myself().await
    }

    async fn create_issue(&self, payload: &IssuePayload) -> Result<CreatedIssue, JiraError> {
        JiraClient::create_issue(self, payload).await
    }
}
