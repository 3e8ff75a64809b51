//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// A `BUSYWORK_*` override that does not parse
    #[error("Invalid value for {var}: {message}")]
    EnvVar { var: String, message: String },

    /// Domain-specific configuration error
    #[error("Domain configuration error in {domain}: {message}")]
    DomainError { domain: String, message: String },
}

impl ConfigError {
    pub fn env_var(var: impl Into<String>, message: impl ToString) -> Self {
        ConfigError::EnvVar {
            var: var.into(),
            message: message.to_string(),
        }
    }

    fn parse(path: &std::path::Path, message: impl ToString) -> Self {
        ConfigError::Parse {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }

    pub(crate) fn yaml(path: &std::path::Path, err: serde_yaml::Error) -> Self {
        Self::parse(path, err)
    }

    pub(crate) fn json(path: &std::path::Path, err: serde_json::Error) -> Self {
        Self::parse(path, err)
    }
}
