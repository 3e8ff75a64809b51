//! Request correlation ids
//!
//! A caller-supplied `X-Request-ID` is kept when it is short printable
//! ASCII; anything else is replaced by a fresh UUID so it cannot smuggle
//! control characters into the logs.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use std::fmt;
use tracing::Instrument;
use uuid::Uuid;

/// Request ID header name
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Longest caller-supplied id that is propagated
pub const MAX_REQUEST_ID_LEN: usize = 128;

/// Correlation id of the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Accept a caller-supplied id, or `None` if it is unusable
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let usable = !value.is_empty()
            && value.len() <= MAX_REQUEST_ID_LEN
            && value.bytes().all(|b| b.is_ascii_graphic());
        usable.then(|| Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_headers(request: &Request<axum::body::Body>) -> Self {
        request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .and_then(Self::parse)
            .unwrap_or_else(Self::generate)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tags the request with an id, runs it inside a span carrying that id and
/// echoes the id back in the response headers.
///
/// The span records the path only; the query string may hold a free-text
/// `desc`.
pub async fn request_id_middleware(mut request: Request<axum::body::Body>, next: Next) -> Response {
    let request_id = RequestId::from_headers(&request);
    request.extensions_mut().insert(request_id.clone());

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    );

    let mut response = next.run(request).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Never rejects: without the middleware in front a new id is generated
impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestId>()
            .cloned()
            .unwrap_or_else(RequestId::generate))
    }
}
