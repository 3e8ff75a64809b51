//! # Busywork REST API
//!
//! HTTP surface of the CPU and memory burner. Every configured framework
//! variant is mounted under its own prefix (`/quarkus`, `/micronaut`,
//! `/springboot`) with the same four endpoints:
//!
//! - `GET /{variant}` - greeting
//! - `GET /{variant}/cpu?iterations=&db=&desc=` - burn CPU
//! - `GET /{variant}/memory?bites=&db=&desc=` - burn memory
//! - `GET /{variant}/stats` - persisted measurements of the variant
//!
//! plus `GET /health` and `GET /ready` at the root.

pub mod app;
pub mod context;
pub mod errors;
pub mod handlers;

pub use app::{create_rest_app, create_variant_router, AppConfig};
pub use context::{HealthContext, VariantContext};
pub use errors::{RestError, RestResult};
