//! Minimal Jira Cloud REST v3 client.
//!
//! Covers the two calls the intake endpoint makes: the `myself` identity
//! check and issue creation. Authentication is HTTP Basic with an account
//! email and API token.

pub mod client;
pub mod credentials;

pub use client::{CreatedIssue, JiraClient, JiraError, JiraErrorKind, JiraUser};
pub use credentials::JiraCredentials;
