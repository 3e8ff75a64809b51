//! Main application configuration and router setup

use axum::{middleware, routing::get, Router};
use busywork_config::{BusyworkConfig, SimulationConfig};
use busywork_interfaces::{Framework, StatisticsStore};
use busywork_web::{cors_layer, error_handler_middleware, handle_not_found, request_id_middleware};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::{
    context::{HealthContext, VariantContext},
    handlers,
};

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Enable CORS middleware
    pub enable_cors: bool,
    /// Enable request ID tracking
    pub enable_request_id: bool,
    /// Enable request tracing
    pub enable_tracing: bool,
    /// Variants to mount, each under its own prefix
    pub variants: Vec<Framework>,
    pub simulation: SimulationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            enable_cors: true,
            enable_request_id: true,
            enable_tracing: true,
            variants: Framework::ALL.to_vec(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl From<&BusyworkConfig> for AppConfig {
    fn from(config: &BusyworkConfig) -> Self {
        Self {
            enable_cors: config.server.enable_cors,
            enable_request_id: config.server.enable_request_id,
            enable_tracing: config.server.enable_tracing,
            variants: config.server.variants.clone(),
            simulation: config.simulation.clone(),
        }
    }
}

/// Create the complete REST API application
pub fn create_rest_app(store: Arc<dyn StatisticsStore>, config: AppConfig) -> Router {
    let mut app = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .with_state(HealthContext::new(store.clone(), config.variants.clone()));

    for framework in &config.variants {
        let context = VariantContext::new(*framework, store.clone(), &config.simulation);
        app = app.merge(create_variant_router(context));
    }

    let mut app = app.fallback(handle_not_found);

    // Add middleware layers (applied in reverse order)
    if config.enable_cors {
        app = app.layer(cors_layer());
    }

    if config.enable_request_id {
        app = app.layer(middleware::from_fn(request_id_middleware));
    }

    if config.enable_tracing {
        app = app.layer(TraceLayer::new_for_http());
    }

    app.layer(middleware::from_fn(error_handler_middleware))
}

/// Routes of a single variant, mounted at `/{path_segment}`
pub fn create_variant_router(context: VariantContext) -> Router {
    let prefix = format!("/{}", context.framework.path_segment());

    Router::new()
        .route(&prefix, get(handlers::hello))
        .route(&format!("{}/cpu", prefix), get(handlers::cpu))
        .route(&format!("{}/memory", prefix), get(handlers::memory))
        .route(&format!("{}/stats", prefix), get(handlers::list_stats))
        .with_state(context)
}
