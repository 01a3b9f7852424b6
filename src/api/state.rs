use std::sync::Arc;

use tokio::sync::RwLock;

use crate::services::CatalogSnapshot;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<RwLock<CatalogSnapshot>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates state with an empty catalog
    pub fn new() -> Self {
        Self::with_catalog(CatalogSnapshot::empty())
    }

    /// Creates state serving an already loaded catalog
    pub fn with_catalog(snapshot: CatalogSnapshot) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(snapshot)),
        }
    }
}
