//! Busywork server
//!
//! Wires configuration, logging, the statistics store and the REST API
//! together and serves every configured variant from one listener.

pub mod services;
pub mod startup;

// Re-export main components
pub use services::{init_logging, ServiceContainer};
pub use startup::{shutdown_signal, Server};
