use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    error::{AppError, AppResult},
    models::Item,
};

/// Supplier of the unfiltered item collection
///
/// The filter engine never talks to a source directly; a source is read once
/// per catalog load and the resulting items are handed to the engine.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Loads every item the source holds
    async fn load(&self) -> AppResult<Vec<Item>>;

    /// Source name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Catalog backed by a JSON array on disk
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl CatalogSource for JsonFileSource {
    async fn load(&self) -> AppResult<Vec<Item>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AppError::NotFound(format!(
                    "catalog file {}",
                    self.path.display()
                )));
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&contents).map_err(|e| {
            AppError::InvalidInput(format!("catalog file {}: {}", self.path.display(), e))
        })
    }

    fn name(&self) -> &'static str {
        "json_file"
    }
}

/// Catalog held in memory
#[derive(Default)]
pub struct StaticSource {
    items: Vec<Item>,
}

impl StaticSource {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }
}

#[async_trait::async_trait]
impl CatalogSource for StaticSource {
    async fn load(&self) -> AppResult<Vec<Item>> {
        Ok(self.items.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// The currently loaded catalog
#[derive(Debug, Clone, Serialize)]
pub struct CatalogSnapshot {
    pub items: Vec<Item>,
    pub source: String,
    pub loaded_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    pub fn new(items: Vec<Item>, source: impl Into<String>) -> Self {
        Self {
            items,
            source: source.into(),
            loaded_at: Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), "empty")
    }
}

/// Loads a source into a fresh snapshot
pub async fn load_catalog(source: &dyn CatalogSource) -> AppResult<CatalogSnapshot> {
    let items = source.load().await.map_err(|e| {
        tracing::error!(source = source.name(), error = %e, "Catalog load failed");
        e
    })?;

    tracing::info!(
        source = source.name(),
        item_count = items.len(),
        "Catalog loaded"
    );

    Ok(CatalogSnapshot::new(items, source.name()))
}
