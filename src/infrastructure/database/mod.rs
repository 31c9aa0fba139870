//! Database Module
//!
//! Connection pool lifecycle. The pool is opened when the server starts and
//! closed when it stops; nothing else in the service owns it.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::any::{AnyConnectOptions, AnyPoolOptions};
use sqlx::{AnyPool, ConnectOptions};
use tokio::sync::Mutex;

use crate::config::DatabaseConfig;
use crate::shared::AppError;

/// Startup/shutdown hooks for the database.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatabaseLifecycle: Send + Sync {
    /// Open connections. Called once before the server accepts requests.
    async fn init(&self) -> Result<(), AppError>;

    /// Release connections. Called once after the server stops.
    async fn close(&self);
}

/// Create a connection pool from settings
pub async fn create_pool(settings: &DatabaseConfig) -> Result<AnyPool, sqlx::Error> {
    sqlx::any::install_default_drivers();

    let mut options = AnyConnectOptions::from_str(&settings.connection_url())?;
    if !settings.echo {
        options = options.disable_statement_logging();
    }

    AnyPoolOptions::new()
        .max_connections(settings.max_connections())
        .min_connections(0)
        .acquire_timeout(settings.acquire_timeout())
        .max_lifetime(settings.recycle())
        .connect_with(options)
        .await
}

/// Lazily opened sqlx pool.
pub struct DatabasePool {
    settings: DatabaseConfig,
    pool: Mutex<Option<AnyPool>>,
}

impl DatabasePool {
    pub fn new(settings: DatabaseConfig) -> Self {
        Self {
            settings,
            pool: Mutex::new(None),
        }
    }

    /// The open pool, or `None` before `init` and after `close`.
    pub async fn pool(&self) -> Option<AnyPool> {
        self.pool.lock().await.clone()
    }
}

#[async_trait]
impl DatabaseLifecycle for DatabasePool {
    async fn init(&self) -> Result<(), AppError> {
        let mut slot = self.pool.lock().await;
        if slot.is_some() {
            return Ok(());
        }

        let pool = create_pool(&self.settings).await?;
        tracing::info!(
            max_connections = self.settings.max_connections(),
            acquire_timeout_secs = self.settings.pool_timeout,
            "Database connection pool created"
        );
        *slot = Some(pool);
        Ok(())
    }

    async fn close(&self) {
        if let Some(pool) = self.pool.lock().await.take() {
            pool.close().await;
            tracing::info!("Database connection pool closed");
        }
    }
}
