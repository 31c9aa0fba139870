//! Telemetry and Observability
//!
//! Structured logging setup driven by the application settings.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, Settings};
use crate::shared::AppError;

/// Filter directives used when `RUST_LOG` is not set.
pub fn default_directives(settings: &Settings) -> String {
    let level = settings.app.log_level.as_filter();
    let mut directives = format!("{level},auth_service={level},tower_http={level}");
    if settings.database.echo {
        directives.push_str(",sqlx::query=debug");
    }
    directives
}

/// Initialize tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured log level. The output is
/// one JSON object per event with `log_format=json`, human-readable otherwise.
pub fn init_tracing(settings: &Settings) -> Result<(), AppError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(settings)));

    let registry = tracing_subscriber::registry().with(env_filter);
    let installed = match settings.app.log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(true).with_current_span(true))
            .try_init(),
        LogFormat::Console => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .try_init(),
    };
    installed.map_err(|err| AppError::Telemetry(err.to_string()))?;

    tracing::info!(
        level = %settings.app.log_level,
        format = ?settings.app.log_format,
        "Tracing initialized"
    );
    Ok(())
}
