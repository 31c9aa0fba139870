//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod docs;
pub mod health;
pub mod root;
