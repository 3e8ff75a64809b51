//! HTTP server configuration

use crate::error::ConfigResult;
use crate::validation::{validate_required_string, Validatable};
use busywork_interfaces::Framework;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::SocketAddr;

/// Port used when neither a port nor a variant is configured
pub const FALLBACK_PORT: u16 = 8080;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Listen port. When unset the first variant's historical port is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Framework variants mounted by this process, each under its own prefix
    #[serde(default = "default_variants")]
    pub variants: Vec<Framework>,

    /// Attach a permissive CORS layer
    pub enable_cors: bool,

    /// Generate and propagate `X-Request-ID`
    pub enable_request_id: bool,

    /// Emit a tracing span per request
    pub enable_tracing: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: None,
            variants: default_variants(),
            enable_cors: true,
            enable_request_id: true,
            enable_tracing: true,
        }
    }
}

impl ServerConfig {
    /// Port the listener binds to
    pub fn resolved_port(&self) -> u16 {
        self.port
            .or_else(|| self.variants.first().map(Framework::default_port))
            .unwrap_or(FALLBACK_PORT)
    }

    /// Full listen address
    pub fn socket_addr(&self) -> ConfigResult<SocketAddr> {
        let addr = format!("{}:{}", self.bind_address, self.resolved_port());
        addr.parse()
            .map_err(|e| self.validation_error(format!("Invalid listen address '{}': {}", addr, e)))
    }
}

impl Validatable for ServerConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.bind_address, "bind_address", self.domain_name())?;

        if self.port == Some(0) {
            return Err(self.validation_error("port must be greater than 0"));
        }

        if self.variants.is_empty() {
            return Err(self.validation_error("At least one variant must be configured"));
        }

        let mut seen = HashSet::new();
        for variant in &self.variants {
            if !seen.insert(variant) {
                return Err(self.validation_error(format!("Variant {} is configured more than once", variant)));
            }
        }

        self.socket_addr()?;

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "server"
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_variants() -> Vec<Framework> {
    Framework::ALL.to_vec()
}
