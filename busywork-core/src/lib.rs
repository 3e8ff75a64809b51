//! Resource consumption simulators for Busywork
//!
//! This crate contains the only logic the variants actually own: burning CPU
//! for a number of iterations and allocating then touching memory, each
//! reporting the wall-clock time it took. Everything else in the workspace
//! is plumbing around these two operations.

pub mod cpu;
pub mod error;
pub mod memory;
pub mod simulator;

// Re-export commonly used types at the crate root
pub use cpu::{burn_cpu, work_units_for, CpuReport, PAUSE, WORK_UNITS_PER_ITERATION};
pub use error::{SimulationError, SimulationResult};
pub use memory::{burn_memory, bytes_for, MemoryHunger, MemoryReport, BYTES_PER_BITE, CHUNK_SIZE};
pub use simulator::Simulator;
