//! Context types for dependency injection in REST API handlers
//!
//! Each variant router gets its own [`VariantContext`]; the store is shared
//! between them and passed in explicitly so tests can swap it for a fake.

use busywork_config::SimulationConfig;
use busywork_core::Simulator;
use busywork_interfaces::{Framework, StatisticsStore};
use std::sync::Arc;

/// Context for the endpoints of one framework variant
#[derive(Clone)]
pub struct VariantContext {
    pub framework: Framework,
    pub store: Arc<dyn StatisticsStore>,
    pub simulator: Simulator,
    /// Magnitudes used when the query omits them or cannot be parsed
    pub default_iterations: i64,
    pub default_bites: i64,
}

impl VariantContext {
    pub fn new(framework: Framework, store: Arc<dyn StatisticsStore>, simulation: &SimulationConfig) -> Self {
        Self {
            framework,
            store,
            simulator: Simulator::new().with_max_bites(simulation.max_bites),
            default_iterations: simulation.default_iterations,
            default_bites: simulation.default_bites,
        }
    }
}

/// Context for the health endpoints
#[derive(Clone)]
pub struct HealthContext {
    pub store: Arc<dyn StatisticsStore>,
    pub variants: Vec<Framework>,
}

impl HealthContext {
    pub fn new(store: Arc<dyn StatisticsStore>, variants: Vec<Framework>) -> Self {
        Self { store, variants }
    }
}
