#![allow(dead_code)]

pub mod fixtures;
pub mod http;

use sheetviz::storage::StorageInstance;
use sheetviz::storage::memory::MemoryStorage;
use std::sync::Arc;

/// Fresh, empty dataset store for one test.
pub fn memory_storage() -> Arc<dyn StorageInstance> {
    Arc::new(MemoryStorage::new())
}
