//! JSON bodies exchanged between the form client and the endpoint.

use serde::{Deserialize, Serialize};

/// `200` body: the issue was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAccepted {
    pub success: bool,
    pub jira_key: String,
    pub jira_url: String,
}

impl SubmitAccepted {
    pub fn new(jira_key: String, jira_url: String) -> Self {
        Self {
            success: true,
            jira_key,
            jira_url,
        }
    }
}

/// `400` body: the submission failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitRejected {
    pub success: bool,
    pub errors: Vec<String>,
}

impl SubmitRejected {
    pub fn new(errors: Vec<String>) -> Self {
        Self {
            success: false,
            errors,
        }
    }
}

/// `500` body: the issue could not be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitFailed {
    pub success: bool,
    pub error: String,
    /// Machine-readable failure kind, e.g. `UPSTREAM_UNAVAILABLE`.
    pub code: String,
}

impl SubmitFailed {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            code: code.into(),
        }
    }
}

/// Any endpoint reply, as read by the client. Unknown shapes decode to all
/// `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReply {
    #[serde(default)]
    pub success: bool,
    pub jira_key: Option<String>,
    pub jira_url: Option<String>,
    pub error: Option<String>,
    pub errors: Option<Vec<String>>,
}
