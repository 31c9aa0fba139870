//! Application Error Types
//!
//! Errors raised while bootstrapping and running the service. Settings
//! failures stay `ConfigError` and abort before any of these can occur.

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Telemetry error: {0}")]
    Telemetry(String),
}
