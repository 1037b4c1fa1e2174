//! Request middleware.
//!
//! - [`cors::cors_middleware`] -- preflight answers and CORS headers on every response.

pub mod cors;
