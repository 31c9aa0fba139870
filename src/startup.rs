//! Application Startup
//!
//! Application building and server lifecycle.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::Settings;
use crate::infrastructure::database::DatabaseLifecycle;
use crate::presentation::http::routes;
use crate::presentation::middleware::{cors, logging};
use crate::shared::AppError;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
}

/// Build the HTTP router with its middleware stack
pub fn build_router(settings: Arc<Settings>) -> Router {
    let cors_layer = cors::create_cors_layer(&settings.app);

    routes::create_router(AppState { settings })
        .layer(logging::create_trace_layer())
        .layer(cors_layer)
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
    database: Arc<dyn DatabaseLifecycle>,
}

impl Application {
    /// Build the application from settings and bind its listener
    pub async fn build(
        settings: Arc<Settings>,
        database: Arc<dyn DatabaseLifecycle>,
    ) -> Result<Self, AppError> {
        let router = build_router(settings.clone());
        let listener = TcpListener::bind((settings.app.host.as_str(), settings.app.port)).await?;

        info!("Listening on {}", listener.local_addr()?);

        Ok(Self {
            listener,
            router,
            database,
        })
    }

    /// Run the server until Ctrl-C or SIGTERM
    pub async fn run_until_stopped(self) -> Result<(), AppError> {
        self.run_until(shutdown_signal()).await
    }

    /// Run the server until `shutdown` resolves.
    ///
    /// The database is initialized before the first request is served and
    /// closed after the serve loop ends, even if startup or serving failed.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), AppError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!("Starting Auth Service...");

        let result = match self.database.init().await {
            Ok(()) => {
                info!("Database initialized successfully");
                axum::serve(self.listener, self.router)
                    .with_graceful_shutdown(shutdown)
                    .await
                    .map_err(AppError::from)
            }
            Err(err) => Err(err),
        };

        info!("Shutting down Auth Service");
        self.database.close().await;
        info!("Database connections closed");

        result
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!("Failed to listen for SIGTERM: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
