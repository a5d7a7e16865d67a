//! Store types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_ROOT: &str = "./cache/kv";

/// Statistics about the store's on-disk contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    pub entries: usize,
    pub total_size: u64,
}

/// Configuration for a file store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStoreConfig {
    pub root: PathBuf,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
        }
    }
}

impl FileStoreConfig {
    /// Read configuration from `KV_STORE_DIR`, falling back to the default root
    pub fn from_env() -> Self {
        Self::from_dir(std::env::var("KV_STORE_DIR").ok())
    }

    /// Build configuration from an optional directory; blank values use the default root
    pub fn from_dir(dir: Option<String>) -> Self {
        let root = dir
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT));
        Self { root }
    }
}
