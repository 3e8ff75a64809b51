//! Store selection from configuration

use crate::memory::InMemoryStatisticsStore;
use crate::seaorm::{DatabaseConnection, DatabaseError, SeaOrmStatisticsStore};
use busywork_config::DatabaseConfig;
use busywork_interfaces::StatisticsStore;
use std::sync::Arc;
use tracing::info;

/// Open the statistics store named by `config.url`.
///
/// `memory://` selects [`InMemoryStatisticsStore`]; any `sqlite:` URL opens a
/// connection pool and, unless disabled, creates the `statistics` table.
pub async fn connect_store(config: &DatabaseConfig) -> Result<Arc<dyn StatisticsStore>, DatabaseError> {
    if config.is_memory_store() {
        info!("Using in-process statistics store");
        return Ok(Arc::new(InMemoryStatisticsStore::new()));
    }

    let db = DatabaseConnection::new(config.clone()).await?;
    if config.run_migrations {
        db.migrate().await?;
    }

    Ok(Arc::new(SeaOrmStatisticsStore::new(db)))
}
