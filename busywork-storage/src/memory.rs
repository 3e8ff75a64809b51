//! In-process statistics store
//!
//! Records live only as long as the process. Selected with the `memory://`
//! database URL and used by tests that do not need SQLite.

use async_trait::async_trait;
use busywork_interfaces::{Framework, MeasurementRecord, NewMeasurement, StatisticsStore, StoreResult};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Inner {
    records: Vec<MeasurementRecord>,
    last_id: i32,
}

/// Statistics store held in memory
#[derive(Debug, Default)]
pub struct InMemoryStatisticsStore {
    inner: RwLock<Inner>,
}

impl InMemoryStatisticsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records across all frameworks
    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl StatisticsStore for InMemoryStatisticsStore {
    async fn save(&self, measurement: NewMeasurement) -> StoreResult<MeasurementRecord> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;

        let record = measurement.into_record(inner.last_id);
        inner.records.push(record.clone());
        Ok(record)
    }

    async fn find_all(&self, framework: Framework) -> StoreResult<Vec<MeasurementRecord>> {
        let inner = self.inner.read().await;
        let mut records: Vec<MeasurementRecord> = inner
            .records
            .iter()
            .filter(|record| record.framework == framework)
            .cloned()
            .collect();

        records.sort_by(|a, b| a.recorded_at.cmp(&b.recorded_at).then(a.id.cmp(&b.id)));
        Ok(records)
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}
