//! Configuration loading and environment variable handling

use crate::domains::BusyworkConfig;
use crate::error::{ConfigError, ConfigResult};
use busywork_interfaces::Framework;
use std::path::Path;
use std::str::FromStr;

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl ConfigLoader {
    /// Create a new config loader with default prefix
    pub fn new() -> Self {
        Self {
            prefix: "BUSYWORK".to_string(),
        }
    }

    /// Create a new config loader with custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Load configuration from a YAML (or `.json`) file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<BusyworkConfig> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let mut config: BusyworkConfig = if is_json {
            serde_json::from_str(&content).map_err(|e| ConfigError::json(path, e))?
        } else {
            serde_yaml::from_str(&content).map_err(|e| ConfigError::yaml(path, e))?
        };

        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env(&self) -> ConfigResult<BusyworkConfig> {
        let mut config = BusyworkConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration with fallback chain
    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<BusyworkConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(&self, config: &mut BusyworkConfig) -> ConfigResult<()> {
        self.apply_server_overrides(&mut config.server)?;
        self.apply_database_overrides(&mut config.database)?;
        self.apply_logging_overrides(&mut config.logging)?;
        self.apply_simulation_overrides(&mut config.simulation)?;
        Ok(())
    }

    /// Apply server config overrides
    fn apply_server_overrides(
        &self,
        config: &mut crate::domains::server::ServerConfig,
    ) -> ConfigResult<()> {
        if let Ok(bind) = self.get_env_var("SERVER_BIND_ADDRESS") {
            config.bind_address = bind;
        }

        if let Ok(port) = self.get_env_var("SERVER_PORT") {
            config.port = Some(
                port.parse()
                    .map_err(|e| self.env_error("SERVER_PORT", e))?,
            );
        }

        if let Ok(variants) = self.get_env_var("VARIANTS") {
            config.variants = variants
                .split(',')
                .filter(|name| !name.trim().is_empty())
                .map(Framework::from_str)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| self.env_error("VARIANTS", e))?;
        }

        Ok(())
    }

    /// Apply database config overrides
    fn apply_database_overrides(
        &self,
        config: &mut crate::domains::database::DatabaseConfig,
    ) -> ConfigResult<()> {
        if let Ok(url) = self.get_env_var("DATABASE_URL") {
            config.url = url;
        }

        if let Ok(max) = self.get_env_var("DATABASE_MAX_CONNECTIONS") {
            config.max_connections = max
                .parse()
                .map_err(|e| self.env_error("DATABASE_MAX_CONNECTIONS", e))?;
        }

        if let Ok(timeout) = self.get_env_var("DATABASE_CONNECTION_TIMEOUT") {
            config.connection_timeout = crate::domains::timeout::parse_timeout(&timeout)
                .map_err(|e| self.env_error("DATABASE_CONNECTION_TIMEOUT", e))?;
        }

        Ok(())
    }

    /// Apply logging config overrides
    fn apply_logging_overrides(
        &self,
        config: &mut crate::domains::logging::LoggingConfig,
    ) -> ConfigResult<()> {
        if let Ok(log_level) = self.get_env_var("LOG_LEVEL") {
            config.level = crate::domains::logging::LogLevel::from_str(&log_level)
                .map_err(|e| self.env_error("LOG_LEVEL", e))?;
        }

        if let Ok(format) = self.get_env_var("LOG_FORMAT") {
            config.format = crate::domains::logging::LogFormat::from_str(&format)
                .map_err(|e| self.env_error("LOG_FORMAT", e))?;
        }

        Ok(())
    }

    /// Apply simulation config overrides
    fn apply_simulation_overrides(
        &self,
        config: &mut crate::domains::simulation::SimulationConfig,
    ) -> ConfigResult<()> {
        if let Ok(iterations) = self.get_env_var("DEFAULT_ITERATIONS") {
            config.default_iterations = iterations
                .parse()
                .map_err(|e| self.env_error("DEFAULT_ITERATIONS", e))?;
        }

        if let Ok(bites) = self.get_env_var("DEFAULT_BITES") {
            config.default_bites = bites
                .parse()
                .map_err(|e| self.env_error("DEFAULT_BITES", e))?;
        }

        if let Ok(max) = self.get_env_var("MAX_BITES") {
            config.max_bites = Some(
                max.parse()
                    .map_err(|e| self.env_error("MAX_BITES", e))?,
            );
        }

        Ok(())
    }

    fn env_error(&self, name: &str, message: impl ToString) -> ConfigError {
        ConfigError::env_var(format!("{}_{}", self.prefix, name), message)
    }

    /// Get environment variable with prefix
    fn get_env_var(&self, name: &str) -> Result<String, std::env::VarError> {
        std::env::var(format!("{}_{}", self.prefix, name))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
