use crate::seaorm::{
    entities::{statistics, FrameworkTag, StatisticActiveModel, Statistics},
    DatabaseConnection,
};
use async_trait::async_trait;
use busywork_interfaces::{Framework, MeasurementRecord, NewMeasurement, StatisticsStore, StoreError, StoreResult};
use sea_orm::{ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use tracing::{debug, warn};

/// Statistics store backed by the `statistics` table
#[derive(Clone)]
pub struct SeaOrmStatisticsStore {
    db: DatabaseConnection,
}

impl SeaOrmStatisticsStore {
    /// Create a new store on an already migrated connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Connection failures mean the store is unavailable; anything else is internal
fn store_error(err: DbErr) -> StoreError {
    match &err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
            warn!("Statistics database unreachable: {}", err);
            StoreError::unavailable(err.to_string())
        }
        _ => {
            warn!("Statistics database error: {}", err);
            StoreError::internal(err.to_string())
        }
    }
}

#[async_trait]
impl StatisticsStore for SeaOrmStatisticsStore {
    async fn save(&self, measurement: NewMeasurement) -> StoreResult<MeasurementRecord> {
        let active_model = StatisticActiveModel::from(measurement);

        let model = active_model
            .insert(self.db.get_connection())
            .await
            .map_err(store_error)?;

        debug!(id = model.id, framework = ?model.framework, kind = ?model.kind, "Stored measurement");
        Ok(model.into())
    }

    async fn find_all(&self, framework: Framework) -> StoreResult<Vec<MeasurementRecord>> {
        let models = Statistics::find()
            .filter(statistics::Column::Framework.eq(FrameworkTag::from(framework)))
            .order_by_asc(statistics::Column::RecordedAt)
            .order_by_asc(statistics::Column::Id)
            .all(self.db.get_connection())
            .await
            .map_err(store_error)?;

        Ok(models.into_iter().map(MeasurementRecord::from).collect())
    }

    async fn health_check(&self) -> StoreResult<()> {
        self.db
            .get_connection()
            .ping()
            .await
            .map_err(|e| StoreError::unavailable(e.to_string()))
    }
}
