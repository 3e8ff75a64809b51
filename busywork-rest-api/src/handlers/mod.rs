//! REST API handlers

pub mod health;
pub mod simulation;
pub mod stats;

pub use health::{health_check, readiness_check};
pub use simulation::{cpu, hello, memory};
pub use stats::list_stats;
