//! The form's screen flow: edit, then either a success or a failure screen.
//!
//! Nothing is sent while the form has validation errors. A failure screen
//! keeps the typed data so the user can go back or retry; retry resends the
//! exact payload of the failed attempt.

use tracing::info;

use intake_core::submission::ProposalSubmission;

use crate::client::{SubmitClient, SubmitReceipt};
use crate::form::{Field, FieldErrors, FormState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Editing,
    Succeeded(SubmitReceipt),
    Failed { message: String },
}

#[derive(Debug, Clone)]
pub struct FormSession {
    form: FormState,
    errors: FieldErrors,
    screen: Screen,
    last_sent: Option<ProposalSubmission>,
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new(FormState::default())
    }
}

impl FormSession {
    pub fn new(form: FormState) -> Self {
        Self {
            form,
            errors: FieldErrors::new(),
            screen: Screen::Editing,
            last_sent: None,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Edit one field. Its pending error, if any, is cleared.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.form.set(field, value);
        self.errors.remove(&field);
    }

    /// Validate and, if clean, send. Returns the screen now shown.
    pub async fn submit(&mut self, client: &SubmitClient) -> &Screen {
        self.errors = self.form.validate();
        if !self.errors.is_empty() {
            info!(fields = self.errors.len(), "Form has validation errors");
            self.screen = Screen::Editing;
            return &self.screen;
        }

        let submission = self.form.to_submission();
        self.send(client, submission).await
    }

    /// Resend the failed attempt. Only meaningful on the failure screen.
    pub async fn retry(&mut self, client: &SubmitClient) -> &Screen {
        let Screen::Failed { .. } = self.screen else {
            return &self.screen;
        };
        match self.last_sent.clone() {
            Some(submission) => self.send(client, submission).await,
            None => self.submit(client).await,
        }
    }

    /// Leave the failure screen with everything typed still in place.
    pub fn go_back(&mut self) {
        if matches!(self.screen, Screen::Failed { .. }) {
            self.screen = Screen::Editing;
        }
    }

    /// Start a fresh, empty form.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    async fn send(&mut self, client: &SubmitClient, submission: ProposalSubmission) -> &Screen {
        let outcome = client.submit(&submission).await;
        self.last_sent = Some(submission);
        self.screen = match outcome {
            Ok(receipt) => {
                info!(jira_key = %receipt.jira_key, "Proposal submitted");
                Screen::Succeeded(receipt)
            }
            Err(failure) => Screen::Failed {
                message: failure.to_string(),
            },
        };
        &self.screen
    }
}
