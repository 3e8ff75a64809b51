//! Server startup and shutdown logic

use anyhow::Result;
use axum::Router;
use busywork_config::BusyworkConfig;
use busywork_rest_api::{create_rest_app, AppConfig};
use std::future::Future;
use tokio::net::TcpListener;

use crate::services::{init_logging, ServiceContainer};

/// Server application struct
pub struct Server {
    config: BusyworkConfig,
    services: ServiceContainer,
}

impl Server {
    /// Create a new server instance
    pub async fn new(config: BusyworkConfig) -> Result<Self> {
        // Initialize logging first
        init_logging(&config)?;

        let services = ServiceContainer::new(&config).await?;

        Ok(Self::with_services(config, services))
    }

    /// Create a server around already constructed services
    pub fn with_services(config: BusyworkConfig, services: ServiceContainer) -> Self {
        Self { config, services }
    }

    /// Build the complete application router
    pub fn build_app(&self) -> Router {
        create_rest_app(self.services.store.clone(), AppConfig::from(&self.config))
    }

    /// Bind the configured address and serve until Ctrl-C or SIGTERM
    pub async fn start(self) -> Result<()> {
        let addr = self.config.server.socket_addr()?;
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `signal` resolves
    pub async fn serve<F>(self, listener: TcpListener, signal: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.build_app();
        let addr = listener.local_addr()?;

        self.log_config_summary();
        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(signal)
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Log configuration summary
    fn log_config_summary(&self) {
        let server = &self.config.server;

        tracing::info!("=== Busywork Server Configuration ===");
        tracing::info!("Bind Address: {}:{}", server.bind_address, server.resolved_port());
        for variant in &server.variants {
            tracing::info!("Variant: {} at /{}", variant.label(), variant.path_segment());
        }
        tracing::info!("Database: {}", self.config.database.url);
        tracing::info!("Default iterations: {}", self.config.simulation.default_iterations);
        tracing::info!("Default bites: {}", self.config.simulation.default_bites);
        match self.config.simulation.max_bites {
            Some(max) => tracing::info!("Max bites: {}", max),
            None => tracing::warn!("Max bites: unbounded, large /memory requests can exhaust the host"),
        }
        tracing::info!("CORS: {}", if server.enable_cors { "Enabled" } else { "Disabled" });
        tracing::info!("Request ID: {}", if server.enable_request_id { "Enabled" } else { "Disabled" });
        tracing::info!("Tracing: {}", if server.enable_tracing { "Enabled" } else { "Disabled" });
        tracing::info!("=====================================");
    }
}

/// Resolves on Ctrl-C or, on unix, SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
