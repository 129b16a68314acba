use std::sync::Arc;

use anyhow::{Result, bail};

use super::StorageInstance;
use super::memory::MemoryStorage;

pub async fn create_storage_from_connection_string(
    connection_string: &str,
) -> Result<Arc<dyn StorageInstance>> {
    Ok(match connection_string {
        s if s.starts_with("memory:") => Arc::new(MemoryStorage::connect(s).await?),

        _ => bail!(
            "Unsupported storage type: {}. Datasets are kept in memory, use 'memory:'",
            connection_string
        ),
    })
}
