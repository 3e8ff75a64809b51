use axum::http::{HeaderName, HeaderValue, Method};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

use super::request_id::REQUEST_ID_HEADER;

/// CORS settings for the API
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Allowed origins; `["*"]` allows any
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    /// Headers exposed to browser scripts
    pub expose_headers: Vec<String>,
    /// Maximum age for preflight cache
    pub max_age: Option<Duration>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            allowed_methods: vec!["GET".to_string(), "OPTIONS".to_string()],
            expose_headers: vec![REQUEST_ID_HEADER.to_ascii_lowercase()],
            max_age: Some(Duration::from_secs(3600)),
        }
    }
}

/// Create CORS layer with the default read-only configuration
pub fn cors_layer() -> CorsLayer {
    cors_layer_with_config(CorsConfig::default())
}

/// Create CORS layer with custom configuration
pub fn cors_layer_with_config(config: CorsConfig) -> CorsLayer {
    let mut cors = CorsLayer::new().allow_headers(Any);

    if config.allowed_origins.iter().any(|origin| origin == "*") {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::error!("Invalid origin '{}' in CORS configuration: {}", origin, e);
                    None
                }
            })
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|method| method.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    let expose_headers: Vec<HeaderName> = config
        .expose_headers
        .iter()
        .filter_map(|header| header.parse().ok())
        .collect();
    cors = cors.expose_headers(expose_headers);

    if let Some(max_age) = config.max_age {
        cors = cors.max_age(max_age);
    }

    cors
}
