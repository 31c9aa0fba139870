//! Database connection settings (`DB_*`).

use std::fmt;
use std::time::Duration;

use super::error::{ConfigError, REDACTED};
use super::source::{EnvSnapshot, Section, SectionSpec};

pub const DEFAULT_DATABASE_URL: &str = "sqlite+aiosqlite:///.auth.db";

static SPEC: SectionSpec = SectionSpec {
    name: "database",
    prefix: "DB",
    nested: "DATABASE",
    fields: &["url", "pool_size", "max_overflow", "pool_timeout", "pool_recycle", "echo"],
};

/// Database connection and pool configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Connection URL, SQLAlchemy-style driver suffixes allowed
    pub url: String,

    /// Connections kept in the pool (at least 1)
    pub pool_size: u32,

    /// Extra connections allowed above `pool_size`
    pub max_overflow: u32,

    /// Seconds to wait for a free connection
    pub pool_timeout: u64,

    /// Seconds after which a connection is replaced (0 = never)
    pub pool_recycle: u64,

    /// Log every SQL statement
    pub echo: bool,
}

impl DatabaseConfig {
    pub fn from_env(env: &EnvSnapshot) -> Result<Self, ConfigError> {
        let section = Section::new(env, &SPEC)?;

        Ok(Self {
            url: section.string("url", DEFAULT_DATABASE_URL),
            pool_size: section.positive("pool_size", 10)?,
            max_overflow: section.integer("max_overflow", 20)?,
            pool_timeout: section.positive("pool_timeout", 30)?,
            pool_recycle: section.integer("pool_recycle", 3600)?,
            echo: section.boolean("echo", false)?,
        })
    }

    /// Upper bound on open connections.
    pub fn max_connections(&self) -> u32 {
        self.pool_size.saturating_add(self.max_overflow)
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.pool_timeout)
    }

    pub fn recycle(&self) -> Option<Duration> {
        (self.pool_recycle > 0).then(|| Duration::from_secs(self.pool_recycle))
    }

    /// The URL in the form sqlx expects.
    ///
    /// Driver suffixes (`sqlite+aiosqlite`, `postgresql+asyncpg`) are dropped
    /// and SQLite files are created on first connect.
    pub fn connection_url(&self) -> String {
        let Some((scheme, rest)) = self.url.split_once("://") else {
            return self.url.clone();
        };
        let dialect = scheme.split('+').next().unwrap_or(scheme);

        match dialect {
            "sqlite" => {
                // SQLAlchemy uses `sqlite:///relative` and `sqlite:////absolute`.
                let path = rest.strip_prefix('/').unwrap_or(rest);
                if path.is_empty() || path == ":memory:" {
                    "sqlite::memory:".to_string()
                } else if path.contains('?') {
                    format!("sqlite://{path}")
                } else {
                    format!("sqlite://{path}?mode=rwc")
                }
            }
            "postgresql" | "postgres" => format!("postgres://{rest}"),
            _ => format!("{dialect}://{rest}"),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            pool_size: 10,
            max_overflow: 20,
            pool_timeout: 30,
            pool_recycle: 3600,
            echo: false,
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &REDACTED)
            .field("pool_size", &self.pool_size)
            .field("max_overflow", &self.max_overflow)
            .field("pool_timeout", &self.pool_timeout)
            .field("pool_recycle", &self.pool_recycle)
            .field("echo", &self.echo)
            .finish()
    }
}
