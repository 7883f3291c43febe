use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::{HierarchySource, MemoryStore, PgStore, UserStore};

/// Shared handles passed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserStore>,
    pub hierarchy: Arc<dyn HierarchySource>,
}

impl AppState {
    pub fn new(config: AppConfig, users: Arc<dyn UserStore>, hierarchy: Arc<dyn HierarchySource>) -> Self {
        Self {
            config: Arc::new(config),
            users,
            hierarchy,
        }
    }

    pub fn with_postgres(config: AppConfig, store: PgStore) -> Self {
        let store = Arc::new(store);
        Self::new(config, store.clone(), store)
    }

    pub fn with_memory(config: AppConfig, store: Arc<MemoryStore>) -> Self {
        Self::new(config, store.clone(), store)
    }
}
