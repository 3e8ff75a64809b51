//! Domain-driven configuration management for Busywork
//!
//! This crate provides configuration split by functional domains (server,
//! database, logging, simulation), with validation, defaults, and
//! environment variable support.

pub mod error;
pub mod loader;
pub mod validation;

// Domain-specific configuration modules
pub mod domains;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use validation::Validatable;

// Re-export domain configurations
pub use domains::{
    database::DatabaseConfig,
    logging::{LogFormat, LogLevel, LoggingConfig},
    server::ServerConfig,
    simulation::SimulationConfig,
    BusyworkConfig,
};

// Re-export utilities
pub use domains::timeout::parse_timeout;
