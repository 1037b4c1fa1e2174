//! Client side of proposal intake.
//!
//! - [`form`] -- the editable form and its field-keyed validation.
//! - [`client`] -- one POST to the submission endpoint.
//! - [`session`] -- edit / success / failure screens, retry and reset.

pub mod client;
pub mod form;
pub mod session;
