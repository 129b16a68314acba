pub mod common;
pub mod memory;
pub mod storage;
pub mod storage_factory;

pub use storage::StorageInstance;
