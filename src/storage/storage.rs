use crate::datamodel::{Dataset, InsertDataset};
use anyhow::Result;
use async_trait::async_trait;
use std::fmt::Debug;

#[async_trait]
pub trait StorageInstance: Send + Sync + Debug {
    async fn create_or_migrate(&self) -> Result<()>;

    /// Stores a validated dataset, giving it the next id and the current time.
    async fn create_dataset(&self, dataset: InsertDataset) -> Result<Dataset>;
    async fn get_dataset(&self, id: u64) -> Result<Option<Dataset>>;
    /// Datasets in insertion order.
    async fn list_datasets(&self) -> Result<Vec<Dataset>>;

    async fn health_check(&self) -> Result<()>;
    async fn close(&self) -> Result<()>;
}
