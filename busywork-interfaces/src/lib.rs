//! # Busywork Interfaces
//!
//! Core domain types and traits shared across the Busywork workspace.
//!
//! This crate is the neutral ground between the simulator, the storage
//! backends and the REST layer: the REST handlers depend on the
//! [`StatisticsStore`] trait only, and the storage crate provides the
//! implementations.
//!
//! ## Main Interfaces
//!
//! - [`Framework`] - the variant a request is served under
//! - [`MeasurementRecord`] / [`NewMeasurement`] - the persisted statistics row
//! - [`StatisticsStore`] - the persistence boundary

pub mod database;
pub mod measurement;

// Re-export commonly used types
pub use database::{StatisticsStore, StoreError, StoreResult};
pub use measurement::{Framework, MeasurementKind, MeasurementRecord, NewMeasurement, ParseFrameworkError};
