use axum::{
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::errors::WebError;
use crate::middleware::request_id::REQUEST_ID_HEADER;

/// Logs every server error response on its way out
pub async fn error_handler_middleware(request: Request<axum::body::Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let response = next.run(request).await;

    if response.status().is_server_error() {
        let request_id = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");
        error!(
            %method,
            path = uri.path(),
            request_id,
            status = response.status().as_u16(),
            "Server error occurred"
        );
    }

    response
}

/// Fallback for unknown routes
pub async fn handle_not_found() -> impl IntoResponse {
    WebError::not_found("The requested resource was not found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::{middleware, routing::get, Router};
    use tower::ServiceExt;

    async fn failing_handler() -> Result<&'static str, WebError> {
        Err(WebError::internal("Test error"))
    }

    #[tokio::test]
    async fn test_error_conversion() {
        let app = Router::new()
            .route("/error", get(failing_handler))
            .fallback(handle_not_found)
            .layer(middleware::from_fn(error_handler_middleware));

        let request = axum::http::Request::builder()
            .uri("/error")
            .body(axum::body::Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let request = axum::http::Request::builder()
            .uri("/nowhere")
            .body(axum::body::Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
