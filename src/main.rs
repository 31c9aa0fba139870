//! # Auth Service
//!
//! Application entry point. Startup order:
//! - Configuration loading (aborts on any invalid setting)
//! - Tracing/logging subsystem
//! - HTTP server, with the database pool opened on start and closed on stop

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info, warn};

use auth_service::config;
use auth_service::infrastructure::database::DatabasePool;
use auth_service::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Logging is configured from settings, so an invalid configuration is
    // reported on stderr by the error return.
    let settings = config::get_settings()?;

    auth_service::telemetry::init_tracing(&settings)?;

    info!(
        host = %settings.app.host,
        port = %settings.app.port,
        environment = %settings.app.environment,
        "Configuration loaded"
    );
    if settings.security.secret_generated() {
        warn!("SECURITY_SECRET_KEY is not set; using a random key that changes on every restart");
    }
    if settings.app.reload {
        debug!("APP_RELOAD has no effect on this server");
    }

    let database = Arc::new(DatabasePool::new(settings.database.clone()));
    let application = Application::build(settings, database).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
