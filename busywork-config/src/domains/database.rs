//! Statistics database configuration

use crate::error::ConfigResult;
use crate::validation::{validate_positive, validate_url, Validatable};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// URL selecting the in-process store instead of a database
pub const MEMORY_STORE_URL: &str = "memory://";

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database URL (sqlite:// or sqlite::memory:, or memory:// for no database)
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connection timeout
    #[serde(with = "crate::domains::timeout::serde_timeout", default = "default_connection_timeout")]
    pub connection_timeout: Duration,

    /// Create the statistics table on startup
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            connection_timeout: default_connection_timeout(),
            run_migrations: true,
        }
    }
}

impl DatabaseConfig {
    /// Whether records are kept in process memory only
    pub fn is_memory_store(&self) -> bool {
        self.url == MEMORY_STORE_URL
    }
}

impl Validatable for DatabaseConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_url(&self.url, "url", self.domain_name())?;
        validate_positive(self.max_connections, "max_connections", self.domain_name())?;

        if self.connection_timeout.is_zero() {
            return Err(self.validation_error("connection_timeout must be greater than 0"));
        }

        if !self.is_memory_store() && !self.url.starts_with("sqlite:") {
            return Err(self.validation_error(format!(
                "Unsupported database URL '{}': expected sqlite: or {}",
                self.url, MEMORY_STORE_URL
            )));
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "database"
    }
}

fn default_database_url() -> String {
    "sqlite::memory:".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_connection_timeout() -> Duration {
    Duration::from_secs(30)
}
