//! Infrastructure Layer
//!
//! Implementations for external resources. Currently only the database pool.

pub mod database;
