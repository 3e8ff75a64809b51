//! Domain-specific configuration modules

pub mod database;
pub mod logging;
pub mod server;
pub mod simulation;
pub mod timeout;

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Main Busywork configuration combining all domains
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BusyworkConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: server::ServerConfig,

    /// Statistics database configuration
    #[serde(default)]
    pub database: database::DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: logging::LoggingConfig,

    /// Simulation defaults and guards
    #[serde(default)]
    pub simulation: simulation::SimulationConfig,
}

impl BusyworkConfig {
    /// Validate all domain configurations
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.logging.validate()?;
        self.simulation.validate()?;
        Ok(())
    }

    /// Generate a sample configuration file
    pub fn generate_sample() -> String {
        let config = BusyworkConfig::default();
        serde_yaml::to_string(&config)
            .unwrap_or_else(|_| "# Failed to generate sample config".to_string())
    }
}
