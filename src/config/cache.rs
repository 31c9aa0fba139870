//! Process-wide settings cache.
//!
//! Settings are loaded at most once per process and never reloaded. The
//! bootstrap receives the cached value explicitly rather than looking it up.

use std::path::Path;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use super::app::AppConfig;
use super::database::DatabaseConfig;
use super::email::EmailConfig;
use super::error::ConfigError;
use super::security::SecurityConfig;
use super::settings::{Settings, DEFAULT_ENV_FILE};
use super::source::EnvSnapshot;

/// Initialize-once holder for [`Settings`].
pub struct SettingsCache {
    cell: OnceCell<Arc<Settings>>,
    dotenv_path: &'static str,
}

impl SettingsCache {
    pub const fn new(dotenv_path: &'static str) -> Self {
        Self {
            cell: OnceCell::new(),
            dotenv_path,
        }
    }

    /// Cached settings, loading them from the process environment and the env
    /// file on first use.
    pub fn get(&self) -> Result<Arc<Settings>, ConfigError> {
        self.get_or_load(|| {
            Settings::load(EnvSnapshot::from_process(), Some(Path::new(self.dotenv_path)))
        })
    }

    /// Cached settings, running `load` only if nothing is cached yet.
    ///
    /// Concurrent first callers block until exactly one `load` finishes. A
    /// failed load leaves the cache empty.
    pub fn get_or_load<F>(&self, load: F) -> Result<Arc<Settings>, ConfigError>
    where
        F: FnOnce() -> Result<Settings, ConfigError>,
    {
        self.cell
            .get_or_try_init(|| -> Result<Arc<Settings>, ConfigError> {
                let settings = load()?;
                tracing::debug!(
                    environment = %settings.app.environment,
                    "Settings loaded"
                );
                Ok(Arc::new(settings))
            })
            .map(Arc::clone)
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl Default for SettingsCache {
    fn default() -> Self {
        Self::new(DEFAULT_ENV_FILE)
    }
}

static SETTINGS: SettingsCache = SettingsCache::new(DEFAULT_ENV_FILE);

/// Application settings, loaded once per process.
pub fn get_settings() -> Result<Arc<Settings>, ConfigError> {
    SETTINGS.get()
}

/// Owned copy of the cached app group. The group accessors never reload.
pub fn get_app_settings() -> Result<AppConfig, ConfigError> {
    Ok(get_settings()?.app.clone())
}

pub fn get_database_settings() -> Result<DatabaseConfig, ConfigError> {
    Ok(get_settings()?.database.clone())
}

pub fn get_security_settings() -> Result<SecurityConfig, ConfigError> {
    Ok(get_settings()?.security.clone())
}

pub fn get_email_settings() -> Result<EmailConfig, ConfigError> {
    Ok(get_settings()?.email.clone())
}
