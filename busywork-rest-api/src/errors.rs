//! REST API specific error types and conversions

use axum::response::{IntoResponse, Response};
use busywork_core::SimulationError;
use busywork_interfaces::StoreError;
use busywork_web::WebError;
use thiserror::Error;

/// REST API specific error type
#[derive(Error, Debug)]
pub enum RestError {
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Statistics store error: {0}")]
    Store(#[from] StoreError),

    #[error("Simulation failed: {0}")]
    Simulation(#[from] SimulationError),
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

impl RestError {
    /// Map to the shared web error, which owns the response format
    pub fn to_web_error(&self) -> WebError {
        match self {
            RestError::ServiceUnavailable(msg) => WebError::service_unavailable(msg.clone()),
            // Store failures are never retried and always surface as 500
            RestError::Store(err) => WebError::internal(err.to_string()),
            RestError::Simulation(err) if err.is_client_error() => WebError::bad_request(err.to_string()),
            RestError::Simulation(err) => WebError::internal(err.to_string()),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        self.to_web_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let unavailable = RestError::from(StoreError::unavailable("connection refused"));
        assert_eq!(unavailable.to_web_error().status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let limit = RestError::from(SimulationError::LimitExceeded { requested: 10, max: 5 });
        assert_eq!(limit.to_web_error().status_code(), StatusCode::BAD_REQUEST);

        let cancelled = RestError::from(SimulationError::Cancelled);
        assert_eq!(cancelled.to_web_error().status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let not_ready = RestError::ServiceUnavailable("store down".to_string());
        assert_eq!(not_ready.to_web_error().status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
