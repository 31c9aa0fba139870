//! # Configuration Module
//!
//! Typed settings for the service, grouped by concern:
//! - `APP_*`      application metadata, server binding, CORS, logging
//! - `DB_*`       database connection pool
//! - `SECURITY_*` token signing, password policy, lockout
//! - `EMAIL_*`    outgoing mail
//!
//! Values come from an optional `.env` file overlaid by the process
//! environment. Any field can also be set with a nested override such as
//! `SECURITY__MAX_LOGIN_ATTEMPTS=3`, which takes precedence over the flat
//! `SECURITY_MAX_LOGIN_ATTEMPTS`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use auth_service::config;
//!
//! let settings = config::get_settings()?;
//! println!("Server will listen on {}:{}", settings.app.host, settings.app.port);
//! ```

mod app;
mod cache;
mod database;
mod email;
mod error;
mod security;
mod settings;
mod source;

pub use app::{AppConfig, Environment, LogFormat, LogLevel};
pub use cache::{
    get_app_settings, get_database_settings, get_email_settings, get_security_settings,
    get_settings, SettingsCache,
};
pub use database::{DatabaseConfig, DEFAULT_DATABASE_URL};
pub use email::EmailConfig;
pub use error::{ConfigError, REDACTED};
pub use security::{SecurityConfig, MIN_SECRET_KEY_LENGTH};
pub use settings::{Settings, DEFAULT_ENV_FILE};
pub use source::EnvSnapshot;
