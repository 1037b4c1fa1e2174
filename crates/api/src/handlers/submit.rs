//! `POST /api/submit` -- validate a proposal and file it as a Jira issue.

use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use intake_core::issue::build_issue_payload;
use intake_core::response::SubmitAccepted;
use intake_core::submission::ProposalSubmission;
use intake_core::validation::validate_submission;
use intake_jira::JiraError;

use crate::error::{SubmitError, SubmitResult};
use crate::state::AppState;
use crate::tracker::IssueTracker;

/// Handle one proposal submission.
///
/// The body is decoded by hand so a malformed body takes the same generic
/// failure path as any other unexpected fault.
pub async fn submit_proposal(
    State(state): State<AppState>,
    body: Bytes,
) -> SubmitResult<Json<SubmitAccepted>> {
    let submission: ProposalSubmission = serde_json::from_slice(&body)
        .map_err(|e| SubmitError::Internal(format!("Malformed submission body: {e}")))?;

    validate_submission(&submission)?;

    let jira = &state.config.jira;
    let payload = build_issue_payload(&jira.project_key, &submission);

    // One deadline covers the whole Jira exchange; config keeps it below the
    // inbound request timeout.
    let deadline = Duration::from_secs(jira.timeout_secs);
    let exchange = async {
        if jira.identity_check {
            log_identity(state.tracker.as_ref()).await;
        }
        state.tracker.create_issue(&payload).await
    };
    let created = tokio::time::timeout(deadline, exchange)
        .await
        .map_err(|_| JiraError::TimedOut(deadline))??;

    tracing::info!(
        key = %created.key,
        id = %created.id,
        project = %jira.project_key,
        "Created Jira issue"
    );

    Ok(Json(SubmitAccepted::new(created.key, created.url)))
}

/// Diagnostic identity check. The result is logged only; issue creation
/// proceeds either way.
async fn log_identity(tracker: &dyn IssueTracker) {
    match tracker.current_user().await {
        Ok(user) => tracing::debug!(
            account_id = user.account_id.as_deref().unwrap_or("unknown"),
            display_name = user.display_name.as_deref().unwrap_or("unknown"),
            "Jira identity check passed"
        ),
        Err(e) => tracing::warn!(error = %e, "Jira identity check failed"),
    }
}
