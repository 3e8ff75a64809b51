//! Simulation defaults and guards

use crate::error::ConfigResult;
use crate::validation::{validate_non_negative, Validatable};
use serde::{Deserialize, Serialize};

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Iterations used when `/cpu` is called without `iterations`
    #[serde(default = "default_magnitude")]
    pub default_iterations: i64,

    /// Megabytes used when `/memory` is called without `bites`
    #[serde(default = "default_magnitude")]
    pub default_bites: i64,

    /// Reject `/memory` requests above this many megabytes. Off when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_bites: Option<i64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            default_iterations: default_magnitude(),
            default_bites: default_magnitude(),
            max_bites: None,
        }
    }
}

impl Validatable for SimulationConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_non_negative(self.default_iterations, "default_iterations", self.domain_name())?;
        validate_non_negative(self.default_bites, "default_bites", self.domain_name())?;

        if let Some(max) = self.max_bites {
            validate_non_negative(max, "max_bites", self.domain_name())?;
            if self.default_bites > max {
                return Err(self.validation_error(format!(
                    "default_bites ({}) exceeds max_bites ({})",
                    self.default_bites, max
                )));
            }
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "simulation"
    }
}

fn default_magnitude() -> i64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.default_iterations, 10);
        assert_eq!(config.default_bites, 10);
        assert_eq!(config.max_bites, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_simulation_validation() {
        let config = SimulationConfig {
            default_bites: 20,
            max_bites: Some(5),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SimulationConfig {
            default_iterations: -1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
