//! Statistics persistence interface
//!
//! The REST layer only ever talks to a [`StatisticsStore`]. Implementations
//! live in `busywork-storage` and are handed to the handlers explicitly, so
//! tests can substitute a fake store without any process-wide state.

use async_trait::async_trait;

use crate::measurement::{Framework, MeasurementRecord, NewMeasurement};

/// Common store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing store cannot be reached
    #[error("Statistics store unavailable: {message}")]
    Unavailable { message: String },

    #[error("Internal store error: {message}")]
    Internal { message: String },
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        StoreError::Unavailable {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        StoreError::Internal {
            message: message.into(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable { .. })
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Insert-and-list persistence for measurement records.
///
/// Each `save` is a single independent insert. Records are never updated or
/// deleted.
#[async_trait]
pub trait StatisticsStore: Send + Sync {
    /// Persist a measurement, returning it with its newly assigned id
    async fn save(&self, measurement: NewMeasurement) -> StoreResult<MeasurementRecord>;

    /// All records stored for a variant, ordered by `recorded_at` then `id`
    async fn find_all(&self, framework: Framework) -> StoreResult<Vec<MeasurementRecord>>;

    /// Check if the store is healthy and can serve requests
    async fn health_check(&self) -> StoreResult<()>;
}
