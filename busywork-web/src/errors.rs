//! Web-specific error types and conversions
//!
//! Every error leaves the server as
//! `{"error": {"code": ..., "message": ..., "status": ...}}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Message returned in place of internal error details
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

/// Web-specific error type for HTTP API operations
#[derive(Debug, Error)]
pub enum WebError {
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },

    #[error("Service unavailable: {message}")]
    ServiceUnavailable { message: String },
}

impl WebError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            WebError::NotFound { .. } => StatusCode::NOT_FOUND,
            WebError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            WebError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            WebError::BadRequest { .. } => "BAD_REQUEST",
            WebError::NotFound { .. } => "NOT_FOUND",
            WebError::Internal { .. } => "INTERNAL_ERROR",
            WebError::ServiceUnavailable { .. } => "SERVICE_UNAVAILABLE",
        }
    }

    /// Message that is safe to show to a client
    pub fn public_message(&self) -> String {
        match self {
            WebError::BadRequest { message }
            | WebError::NotFound { message }
            | WebError::ServiceUnavailable { message } => message.clone(),
            WebError::Internal { .. } => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        WebError::BadRequest {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        WebError::NotFound {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        WebError::Internal {
            message: message.into(),
        }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        WebError::ServiceUnavailable {
            message: message.into(),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let WebError::Internal { message } = &self {
            error!("Internal error: {}", message);
        }

        let body = json!({
            "error": {
                "code": self.error_code(),
                "message": self.public_message(),
                "status": status.as_u16(),
            }
        });

        (status, Json(body)).into_response()
    }
}
