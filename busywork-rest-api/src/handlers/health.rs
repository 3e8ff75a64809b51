//! Health check endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info, warn};

use crate::{
    context::HealthContext,
    errors::{RestError, RestResult},
};

/// Liveness response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
    pub variants: Vec<String>,
}

/// Liveness probe: answers as long as the process serves requests
pub async fn health_check(State(ctx): State<HealthContext>) -> Json<HealthResponse> {
    info!("Health check requested");

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        variants: ctx.variants.iter().map(|v| v.label().to_string()).collect(),
    })
}

/// Readiness probe: 200 once the statistics store answers, 503 otherwise
pub async fn readiness_check(State(ctx): State<HealthContext>) -> RestResult<Json<serde_json::Value>> {
    match ctx.store.health_check().await {
        Ok(()) => {
            info!("Readiness check passed");
            Ok(Json(json!({
                "status": "ready",
                "timestamp": chrono::Utc::now(),
                "checks": {
                    "database": { "ready": true }
                }
            })))
        }
        Err(e) => {
            if e.is_unavailable() {
                warn!("Readiness check failed, store unreachable: {}", e);
            } else {
                error!("Readiness check failed: {}", e);
            }
            Err(RestError::ServiceUnavailable(format!("Statistics store not ready: {}", e)))
        }
    }
}
