//! Service construction for the server

use anyhow::{Context, Result};
use busywork_config::BusyworkConfig;
use busywork_interfaces::StatisticsStore;
use std::sync::Arc;
use tracing::info;

/// Long-lived services shared by every request
#[derive(Clone)]
pub struct ServiceContainer {
    pub store: Arc<dyn StatisticsStore>,
}

impl ServiceContainer {
    /// Open the statistics store named by the configuration
    pub async fn new(config: &BusyworkConfig) -> Result<Self> {
        let store = busywork_storage::connect_store(&config.database)
            .await
            .with_context(|| format!("Failed to open statistics store at {}", config.database.url))?;

        info!("Statistics store ready");
        Ok(Self { store })
    }
}

/// Install the global tracing subscriber
pub fn init_logging(config: &BusyworkConfig) -> Result<()> {
    busywork_logging::init_logging_from_config(&config.logging)
}
