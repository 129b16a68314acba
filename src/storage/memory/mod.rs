use super::common::timestamp_now;
use crate::datamodel::{Dataset, InsertDataset};
use crate::storage::StorageInstance;
use anyhow::{Result, bail};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Process-local dataset store. Everything is lost when the process stops.
#[derive(Debug)]
pub struct MemoryStorage {
    // The id counter and the map only change together, under this lock.
    state: Mutex<MemoryState>,
}

#[derive(Debug)]
struct MemoryState {
    next_id: u64,
    datasets: BTreeMap<u64, Dataset>,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            next_id: 1,
            datasets: BTreeMap::new(),
        }
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState::default()),
        }
    }

    pub async fn connect(connection_string: &str) -> Result<Self> {
        match connection_string.strip_prefix("memory:") {
            Some("") | Some("//") => Ok(Self::new()),
            _ => bail!(
                "Invalid memory storage connection string '{}', expected 'memory:'",
                connection_string
            ),
        }
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.datasets.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageInstance for MemoryStorage {
    async fn create_or_migrate(&self) -> Result<()> {
        Ok(())
    }

    async fn create_dataset(&self, dataset: InsertDataset) -> Result<Dataset> {
        let mut state = self.state.lock().await;
        let id = state.next_id;
        let dataset = Dataset::from_insert(dataset, id, timestamp_now()?);
        state.next_id += 1;
        state.datasets.insert(id, dataset.clone());
        debug!("Stored dataset {} ({})", id, dataset.file_name);
        Ok(dataset)
    }

    async fn get_dataset(&self, id: u64) -> Result<Option<Dataset>> {
        Ok(self.state.lock().await.datasets.get(&id).cloned())
    }

    async fn list_datasets(&self) -> Result<Vec<Dataset>> {
        Ok(self.state.lock().await.datasets.values().cloned().collect())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        info!(
            "Discarding {} in-memory dataset(s)",
            state.datasets.len()
        );
        state.datasets.clear();
        Ok(())
    }
}
