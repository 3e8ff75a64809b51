//! # Busywork Web Utilities
//!
//! Reusable middleware and extractors for the Busywork HTTP API: error
//! responses, lenient query parameters, request ids and CORS.
//!
//! ## Example
//!
//! ```rust,no_run
//! use axum::{middleware, routing::get, Router};
//! use busywork_web::{cors_layer, request_id_middleware, QueryParams};
//!
//! async fn burn(query: QueryParams) -> String {
//!     format!("{} iterations", query.int_or("iterations", 10))
//! }
//!
//! # #[tokio::main]
//! # async fn main() {
//! let app: Router = Router::new()
//!     .route("/burn", get(burn))
//!     .layer(middleware::from_fn(request_id_middleware))
//!     .layer(cors_layer());
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
//! axum::serve(listener, app).await.unwrap();
//! # }
//! ```

pub mod errors;
pub mod extractors;
pub mod middleware;

// Re-export commonly used types and functions
pub use errors::WebError;
pub use extractors::QueryParams;
pub use middleware::{
    cors_layer, cors_layer_with_config, error_handler_middleware, handle_not_found, request_id_middleware,
    CorsConfig, RequestId, REQUEST_ID_HEADER,
};
