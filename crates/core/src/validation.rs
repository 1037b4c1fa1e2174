//! Submission validation.
//!
//! The endpoint cannot trust the form, so it re-runs these checks on every
//! request. The form client reuses the pattern helpers for its own,
//! field-keyed messages.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::submission::ProposalSubmission;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Prefix every repository URL must carry.
pub const GITHUB_URL_PREFIX: &str = "https://github.com/";

/// Basic `local@domain.tld` shape check.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// `owner/repo` shape for GitHub repository links.
pub const GITHUB_REPO_PATTERN: &str = r"^https?://github\.com/[\w.\-]+/[\w.\-]+/?.*$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

static GITHUB_REPO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(GITHUB_REPO_PATTERN).expect("valid regex"));

pub const MSG_FIRST_NAME_REQUIRED: &str = "First name is required";
pub const MSG_LAST_NAME_REQUIRED: &str = "Last name is required";
pub const MSG_EMAIL_REQUIRED: &str = "Email is required";
pub const MSG_EMAIL_INVALID: &str = "Invalid email format";
pub const MSG_SUMMARY_REQUIRED: &str = "Specification name is required";
pub const MSG_DESCRIPTION_REQUIRED: &str = "Proposal details are required";
pub const MSG_GITHUB_URL_PREFIX: &str = "GitHub URL must start with https://github.com/";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_github_repo_url(url: &str) -> bool {
    url.starts_with(GITHUB_URL_PREFIX) && GITHUB_REPO_RE.is_match(url)
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Collect every validation message for a submission, in form order.
///
/// An empty vector means the submission may be forwarded to the tracker.
pub fn validation_errors(sub: &ProposalSubmission) -> Vec<String> {
    let mut errors = Vec::new();

    if is_blank(sub.first_name.as_deref()) {
        errors.push(MSG_FIRST_NAME_REQUIRED.to_string());
    }
    if is_blank(sub.last_name.as_deref()) {
        errors.push(MSG_LAST_NAME_REQUIRED.to_string());
    }
    match sub.email.as_deref() {
        email if is_blank(email) => errors.push(MSG_EMAIL_REQUIRED.to_string()),
        Some(email) if !is_valid_email(email) => errors.push(MSG_EMAIL_INVALID.to_string()),
        _ => {}
    }
    if is_blank(sub.summary.as_deref()) {
        errors.push(MSG_SUMMARY_REQUIRED.to_string());
    }
    if is_blank(sub.description.as_deref()) {
        errors.push(MSG_DESCRIPTION_REQUIRED.to_string());
    }
    if let Some(url) = sub.github_url() {
        if !url.starts_with(GITHUB_URL_PREFIX) {
            errors.push(MSG_GITHUB_URL_PREFIX.to_string());
        }
    }

    errors
}

/// Validate a submission, returning every message at once on failure.
pub fn validate_submission(sub: &ProposalSubmission) -> Result<(), CoreError> {
    let errors = validation_errors(sub);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(errors))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn valid() -> ProposalSubmission {
        ProposalSubmission {
            first_name: Some("Jane".into()),
            last_name: Some("Doe".into()),
            email: Some("jane@x.com".into()),
            summary: Some("Zfoo".into()),
            description: Some("Adds foo.".into()),
            ..Default::default()
        }
    }

    #[test]
    fn valid_submission_passes() {
        assert!(validate_submission(&valid()).is_ok());
    }

    #[test]
    fn empty_submission_reports_every_required_field_in_order() {
        let errors = validation_errors(&ProposalSubmission::default());
        assert_eq!(
            errors,
            vec![
                MSG_FIRST_NAME_REQUIRED,
                MSG_LAST_NAME_REQUIRED,
                MSG_EMAIL_REQUIRED,
                MSG_SUMMARY_REQUIRED,
                MSG_DESCRIPTION_REQUIRED,
            ]
        );
    }

    #[test]
    fn whitespace_only_fields_are_missing() {
        let sub = ProposalSubmission {
            first_name: Some("   ".into()),
            description: Some("\n\t".into()),
            ..valid()
        };
        let errors = validation_errors(&sub);
        assert_eq!(errors, vec![MSG_FIRST_NAME_REQUIRED, MSG_DESCRIPTION_REQUIRED]);
    }

    #[test]
    fn malformed_email_is_rejected() {
        let sub = ProposalSubmission {
            email: Some("not-an-email".into()),
            ..valid()
        };
        assert_matches!(
            validate_submission(&sub),
            Err(CoreError::Validation(errors)) if errors == vec![MSG_EMAIL_INVALID]
        );
    }

    #[test]
    fn email_pattern_cases() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("@c.d"));
    }

    #[test]
    fn github_url_must_use_https_prefix() {
        let sub = ProposalSubmission {
            github_url: Some("http://github.com/riscv/foo".into()),
            ..valid()
        };
        assert_eq!(validation_errors(&sub), vec![MSG_GITHUB_URL_PREFIX]);

        let ok = ProposalSubmission {
            github_url: Some("https://github.com/riscv/foo".into()),
            ..valid()
        };
        assert!(validation_errors(&ok).is_empty());
    }

    #[test]
    fn classification_is_never_a_validation_failure() {
        for raw in ["HALF-ISA", " ISA ", ""] {
            let sub = ProposalSubmission {
                isa_type: Some(raw.into()),
                ..valid()
            };
            assert!(validation_errors(&sub).is_empty(), "isaType {raw:?}");
        }
    }

    #[test]
    fn github_repo_pattern_requires_owner_and_repo() {
        assert!(is_github_repo_url("https://github.com/riscv/riscv-isa-manual"));
        assert!(is_github_repo_url("https://github.com/riscv/foo/tree/main"));
        assert!(!is_github_repo_url("https://github.com/riscv"));
        assert!(!is_github_repo_url("http://github.com/riscv/foo"));
        assert!(!is_github_repo_url("https://gitlab.com/riscv/foo"));
    }
}
