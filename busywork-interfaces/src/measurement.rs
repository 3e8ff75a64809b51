//! Measurement domain types
//!
//! A measurement describes one completed simulation run. Callers build a
//! [`NewMeasurement`]; only a store turns it into a [`MeasurementRecord`] by
//! assigning the surrogate id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// The framework variant a request is served under.
///
/// Each variant exposes the same API under its own path prefix and answers
/// with its own response label. The tag is fixed per variant and stored with
/// every measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Framework {
    Quarkus,
    Micronaut,
    #[serde(alias = "SPRING_BOOT")]
    SpringBoot,
}

impl Framework {
    /// All variants, in their historical port order
    pub const ALL: [Framework; 3] = [Framework::Quarkus, Framework::Micronaut, Framework::SpringBoot];

    /// Human readable label used as response prefix
    pub fn label(&self) -> &'static str {
        match self {
            Framework::Quarkus => "Quarkus",
            Framework::Micronaut => "Micronaut",
            Framework::SpringBoot => "Spring Boot",
        }
    }

    /// Path segment the variant is mounted under
    pub fn path_segment(&self) -> &'static str {
        match self {
            Framework::Quarkus => "quarkus",
            Framework::Micronaut => "micronaut",
            Framework::SpringBoot => "springboot",
        }
    }

    /// Storage tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::Quarkus => "QUARKUS",
            Framework::Micronaut => "MICRONAUT",
            Framework::SpringBoot => "SPRINGBOOT",
        }
    }

    /// Port the standalone deployment of this variant listened on
    pub fn default_port(&self) -> u16 {
        match self {
            Framework::Quarkus => 8701,
            Framework::Micronaut => 8702,
            Framework::SpringBoot => 8703,
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a framework name cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown framework variant: {0}")]
pub struct ParseFrameworkError(pub String);

impl FromStr for Framework {
    type Err = ParseFrameworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quarkus" => Ok(Framework::Quarkus),
            "micronaut" => Ok(Framework::Micronaut),
            "springboot" | "spring-boot" | "spring_boot" | "spring boot" => Ok(Framework::SpringBoot),
            _ => Err(ParseFrameworkError(s.to_string())),
        }
    }
}

/// Which resource a simulation consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MeasurementKind {
    Cpu,
    Memory,
}

impl MeasurementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementKind::Cpu => "CPU",
            MeasurementKind::Memory => "MEMORY",
        }
    }
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A measurement that has not been persisted yet.
///
/// There is deliberately no `id` field: ids are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMeasurement {
    pub recorded_at: DateTime<Utc>,
    pub framework: Framework,
    pub kind: MeasurementKind,
    /// Magnitude used for the run, as a non-negative integer string
    pub parameter: String,
    #[serde(rename = "elapsedNanos", with = "elapsed_nanos")]
    pub elapsed: Duration,
    pub description: Option<String>,
}

impl NewMeasurement {
    /// Build a measurement stamped with the current time.
    ///
    /// Negative magnitudes are recorded as `0`, which is the amount of work
    /// the simulator performs for them.
    pub fn new(framework: Framework, kind: MeasurementKind, magnitude: i64, elapsed: Duration) -> Self {
        Self {
            recorded_at: Utc::now(),
            framework,
            kind,
            parameter: magnitude.max(0).to_string(),
            elapsed,
            description: None,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Attach the store-assigned id
    pub fn into_record(self, id: i32) -> MeasurementRecord {
        MeasurementRecord {
            id,
            recorded_at: self.recorded_at,
            framework: self.framework,
            kind: self.kind,
            parameter: self.parameter,
            elapsed: self.elapsed,
            description: self.description,
        }
    }
}

/// A persisted measurement. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementRecord {
    pub id: i32,
    pub recorded_at: DateTime<Utc>,
    pub framework: Framework,
    pub kind: MeasurementKind,
    pub parameter: String,
    #[serde(rename = "elapsedNanos", with = "elapsed_nanos")]
    pub elapsed: Duration,
    pub description: Option<String>,
}

/// Serde helper for durations stored as whole nanoseconds
pub mod elapsed_nanos {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let nanos = u64::deserialize(deserializer)?;
        Ok(Duration::from_nanos(nanos))
    }
}
