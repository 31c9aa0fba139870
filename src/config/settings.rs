//! Root settings aggregate.

use std::path::Path;

use super::app::AppConfig;
use super::database::DatabaseConfig;
use super::email::EmailConfig;
use super::error::ConfigError;
use super::security::SecurityConfig;
use super::source::EnvSnapshot;

/// Env file read by default, relative to the working directory.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Application metadata, server binding, CORS and logging
    pub app: AppConfig,

    /// Database connection pool
    pub database: DatabaseConfig,

    /// Token signing, password policy and lockout
    pub security: SecurityConfig,

    /// Outgoing mail
    pub email: EmailConfig,
}

impl Settings {
    /// Load settings from an environment snapshot and an optional env file.
    ///
    /// The loading order is:
    /// 1. Documented defaults
    /// 2. `dotenv_path`, when it exists
    /// 3. `env` (highest priority)
    ///
    /// The file and `env` are merged by variable name first. A nested
    /// `SECTION__FIELD` variable then beats the flat `PREFIX_FIELD` one
    /// wherever each came from, so a nested key in the file overrides a flat
    /// key in `env`.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` encountered; no partial settings are produced.
    pub fn load(env: EnvSnapshot, dotenv_path: Option<&Path>) -> Result<Self, ConfigError> {
        let merged = EnvSnapshot::load(env, dotenv_path)?;
        Self::from_env(&merged)
    }

    /// Build every group from an already merged snapshot.
    pub fn from_env(env: &EnvSnapshot) -> Result<Self, ConfigError> {
        Ok(Self {
            database: DatabaseConfig::from_env(env)?,
            security: SecurityConfig::from_env(env)?,
            email: EmailConfig::from_env(env)?,
            app: AppConfig::from_env(env)?,
        })
    }
}
