use std::sync::Arc;

use crate::config::StatsConfig;
use crate::storage::StorageConfig;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<StorageConfig>,
    pub stats: Arc<StatsConfig>,
}

impl AppState {
    pub fn new(storage: StorageConfig, stats: StatsConfig) -> Self {
        Self {
            storage: Arc::new(storage),
            stats: Arc::new(stats),
        }
    }
}
