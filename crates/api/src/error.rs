use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use intake_core::error::CoreError;
use intake_core::response::{SubmitFailed, SubmitRejected};
use intake_jira::{JiraError, JiraErrorKind};

/// Message shown to the submitter whenever the issue could not be created.
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create Jira issue. Please try again later.";

/// Outcome of a failed submission.
///
/// Each variant maps to one response shape; Jira details are logged but
/// never sent back to the browser.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The submission failed one or more field checks.
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Jira refused the configured credentials.
    #[error("Jira rejected the credentials: {0}")]
    UpstreamAuth(#[source] JiraError),

    /// Jira could not be reached or is failing.
    #[error("Jira is unavailable: {0}")]
    UpstreamUnavailable(#[source] JiraError),

    /// Jira refused the issue payload.
    #[error("Jira rejected the issue: {0}")]
    UpstreamRejected(#[source] JiraError),

    /// Anything else: malformed bodies, panics.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type SubmitResult<T> = Result<T, SubmitError>;

impl SubmitError {
    /// Machine-readable code sent alongside 500 responses.
    pub fn code(&self) -> &'static str {
        match self {
            SubmitError::Validation(_) => "VALIDATION_ERROR",
            SubmitError::UpstreamAuth(_) => "UPSTREAM_AUTH",
            SubmitError::UpstreamUnavailable(_) => "UPSTREAM_UNAVAILABLE",
            SubmitError::UpstreamRejected(_) => "UPSTREAM_REJECTED",
            SubmitError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<CoreError> for SubmitError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(errors) => SubmitError::Validation(errors),
        }
    }
}

impl From<JiraError> for SubmitError {
    fn from(err: JiraError) -> Self {
        match err.kind() {
            JiraErrorKind::Auth => SubmitError::UpstreamAuth(err),
            JiraErrorKind::Unavailable => SubmitError::UpstreamUnavailable(err),
            JiraErrorKind::Rejected => SubmitError::UpstreamRejected(err),
        }
    }
}

impl IntoResponse for SubmitError {
    fn into_response(self) -> Response {
        let code = self.code();
        match self {
            SubmitError::Validation(errors) => {
                tracing::info!(count = errors.len(), "Submission failed validation");
                (StatusCode::BAD_REQUEST, Json(SubmitRejected::new(errors))).into_response()
            }
            SubmitError::UpstreamAuth(err)
            | SubmitError::UpstreamUnavailable(err)
            | SubmitError::UpstreamRejected(err) => {
                tracing::error!(error = %err, code, "Jira API error");
                failed(code)
            }
            SubmitError::Internal(msg) => {
                tracing::error!(error = %msg, "Error processing request");
                failed(code)
            }
        }
    }
}

fn failed(code: &'static str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(SubmitFailed::new(CREATE_FAILED_MESSAGE, code)),
    )
        .into_response()
}
