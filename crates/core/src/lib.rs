//! Domain types shared by the submission endpoint and the form client.
//!
//! - [`submission`] -- the proposal form as it travels over the wire.
//! - [`validation`] -- field checks both sides agree on.
//! - [`adf`] -- plain text to Atlassian Document Format.
//! - [`issue`] -- the Jira issue-creation payload built from a submission.
//! - [`response`] -- endpoint reply bodies.

pub mod adf;
pub mod error;
pub mod issue;
pub mod response;
pub mod submission;
pub mod validation;
