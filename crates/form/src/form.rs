//! Form state and client-side validation.
//!
//! Fields hold exactly what the user typed. Validation mirrors the endpoint's
//! checks and adds the selections the form marks as required.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use intake_core::submission::{Classification, ExtensionsInput, FastTrackInput, ProposalSubmission};
use intake_core::validation::{is_github_repo_url, is_valid_email};

pub const FAST_TRACK_OPTIONS: [&str; 2] = ["Yes", "No"];

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Affiliation,
    Summary,
    Description,
    IsaType,
    FastTrack,
    GithubUrl,
    Extensions,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::Email => "Email",
            Field::Affiliation => "Affiliation",
            Field::Summary => "Specification Name",
            Field::Description => "Proposal Details",
            Field::IsaType => "ISA / NON-ISA",
            Field::FastTrack => "Fast Track",
            Field::GithubUrl => "GitHub URL",
            Field::Extensions => "Extensions",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validation messages keyed by field, in form order.
pub type FieldErrors = BTreeMap<Field, String>;

// ---------------------------------------------------------------------------
// Form state
// ---------------------------------------------------------------------------

/// The form as typed. Empty strings mean "not filled in".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormState {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub affiliation: String,
    pub summary: String,
    pub description: String,
    /// `"ISA"`, `"NON-ISA"` or empty.
    pub isa_type: String,
    /// `"Yes"`, `"No"` or empty.
    pub fast_track: String,
    pub github_url: String,
    /// Free-form, comma and/or whitespace separated.
    pub extensions: String,
}

impl FormState {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Affiliation => &self.affiliation,
            Field::Summary => &self.summary,
            Field::Description => &self.description,
            Field::IsaType => &self.isa_type,
            Field::FastTrack => &self.fast_track,
            Field::GithubUrl => &self.github_url,
            Field::Extensions => &self.extensions,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
            Field::Affiliation => &mut self.affiliation,
            Field::Summary => &mut self.summary,
            Field::Description => &mut self.description,
            Field::IsaType => &mut self.isa_type,
            Field::FastTrack => &mut self.fast_track,
            Field::GithubUrl => &mut self.github_url,
            Field::Extensions => &mut self.extensions,
        };
        *slot = value.into();
    }

    /// Check every field. An empty map means the form may be sent.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        let mut require = |field: Field, message: &str| {
            if self.get(field).trim().is_empty() {
                errors.insert(field, message.to_string());
                true
            } else {
                false
            }
        };

        require(Field::FirstName, "First name is required");
        require(Field::LastName, "Last name is required");
        let email_missing = require(Field::Email, "Email is required");
        require(Field::Affiliation, "Affiliation is required");
        require(Field::Summary, "Specification name is required");
        require(Field::Description, "Proposal details are required");

        if !email_missing && !is_valid_email(&self.email) {
            errors.insert(Field::Email, "Please enter a valid email address".into());
        }

        let isa_known = Classification::ALL
            .iter()
            .any(|c| c.as_str() == self.isa_type);
        if !isa_known {
            errors.insert(Field::IsaType, "Please select ISA or NON-ISA".into());
        }

        if !FAST_TRACK_OPTIONS.contains(&self.fast_track.as_str()) {
            errors.insert(Field::FastTrack, "Please select Fast Track option".into());
        }

        if !self.github_url.is_empty() && !is_github_repo_url(&self.github_url) {
            errors.insert(
                Field::GithubUrl,
                "Invalid GitHub URL (e.g., https://github.com/owner/repo)".into(),
            );
        }

        errors
    }

    /// Build the request body, normalising optional fields.
    pub fn to_submission(&self) -> ProposalSubmission {
        ProposalSubmission {
            first_name: Some(self.first_name.clone()),
            last_name: Some(self.last_name.clone()),
            email: Some(self.email.clone()),
            affiliation: Some(self.affiliation.clone()),
            summary: Some(self.summary.clone()),
            description: Some(self.description.clone()),
            isa_type: Some(self.isa_type.clone()),
            fast_track: Some(FastTrackInput::Text(self.fast_track.clone())),
            github_url: Some(self.github_url.clone()).filter(|url| !url.is_empty()),
            extensions: Some(ExtensionsInput::List(split_extensions(&self.extensions))),
        }
    }
}

/// Split free-form extension input on commas and/or whitespace.
///
/// Empty tokens are dropped; order and repeats are kept as typed.
pub fn split_extensions(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
