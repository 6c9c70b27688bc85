//! Dataset providers.

use async_trait::async_trait;
use covidash_common::{DashError, Observation, Result};
use covidash_engine::Table;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Source of the observation table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Loads the full table.
    async fn load(&self) -> Result<Table>;

    /// Human-readable source description for logs.
    fn describe(&self) -> String;
}

/// Reads a JSON array of observation records from a local file.
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    /// Creates a provider for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Dataset path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DataProvider for JsonFileProvider {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Table> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            DashError::dataset_with_source(format!("cannot read {}", self.path.display()), e)
        })?;
        let rows: Vec<Observation> = serde_json::from_slice(&bytes).map_err(|e| {
            DashError::dataset_with_source(format!("cannot parse {}", self.path.display()), e)
        })?;

        let table = Table::new(rows);
        info!(
            rows = table.len(),
            entities = table.entities().len(),
            "Loaded dataset"
        );
        Ok(table)
    }

    fn describe(&self) -> String {
        format!("json file {}", self.path.display())
    }
}
