//! File-backed storage and the default backend selection

use file_kv_store::{FileStore, FileStoreError};
use tracing::debug;

use super::{MemoryStorage, Storage};
use crate::config::{StorageBackend, StorageConfig};

impl Storage for FileStore {
    type Error = FileStoreError;

    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
        self.get(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.set(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), Self::Error> {
        self.remove(key)
    }
}

/// Backend used when a cache is connected without an explicit one
#[derive(Debug)]
pub enum DefaultStorage {
    File(FileStore),
    Memory(MemoryStorage),
}

impl DefaultStorage {
    /// Build the configured backend, creating the store directory if needed
    pub fn from_config(config: &StorageConfig) -> file_kv_store::Result<Self> {
        match &config.backend {
            StorageBackend::File(root) => {
                let store = FileStore::new(root.clone());
                store.init()?;
                debug!(root = ?root, "Using file storage");
                Ok(DefaultStorage::File(store))
            }
            StorageBackend::Memory => {
                debug!("Using in-memory storage");
                Ok(DefaultStorage::Memory(MemoryStorage::new()))
            }
        }
    }
}

impl Storage for DefaultStorage {
    type Error = FileStoreError;

    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
        match self {
            DefaultStorage::File(store) => store.get(key),
            DefaultStorage::Memory(memory) => memory.get_item(key).map_err(|never| match never {}),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        match self {
            DefaultStorage::File(store) => store.set(key, value),
            DefaultStorage::Memory(memory) => {
                memory.set_item(key, value).map_err(|never| match never {})
            }
        }
    }

    fn remove_item(&self, key: &str) -> Result<(), Self::Error> {
        match self {
            DefaultStorage::File(store) => store.remove(key),
            DefaultStorage::Memory(memory) => memory.remove_item(key).map_err(|never| match never {}),
        }
    }
}
