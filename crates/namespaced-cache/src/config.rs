//! Default backend configuration

use std::env;
use std::path::PathBuf;

use file_kv_store::FileStoreConfig;
use tracing::warn;

/// Which backend a default-connected cache uses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Persistent file store rooted at the given directory
    File(PathBuf),
    /// Process-local map, dropped with the cache
    Memory,
}

/// Configuration for the default backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File(FileStoreConfig::default().root),
        }
    }
}

impl StorageConfig {
    /// Parse configuration from `KV_STORE_BACKEND` (`file` or `memory`) and `KV_STORE_DIR`
    pub fn from_env() -> Self {
        Self::from_parts(
            env::var("KV_STORE_BACKEND").ok(),
            FileStoreConfig::from_env(),
        )
    }

    fn from_parts(backend: Option<String>, file_config: FileStoreConfig) -> Self {
        let file = || StorageBackend::File(file_config.root.clone());

        let backend = match backend.as_deref().map(|b| b.trim().to_ascii_lowercase()) {
            None => file(),
            Some(b) if b.is_empty() || b == "file" => file(),
            Some(b) if b == "memory" => StorageBackend::Memory,
            Some(other) => {
                warn!(backend = %other, "Unknown KV_STORE_BACKEND, using file storage");
                file()
            }
        };

        Self { backend }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StorageConfig::default();
        assert_eq!(
            config.backend,
            StorageBackend::File(PathBuf::from("./cache/kv"))
        );
    }

    fn file_config(dir: Option<&str>) -> FileStoreConfig {
        FileStoreConfig::from_dir(dir.map(str::to_string))
    }

    #[test]
    fn test_no_vars_matches_default() {
        assert_eq!(
            StorageConfig::from_parts(None, file_config(None)),
            StorageConfig::default()
        );
    }

    #[test]
    fn test_file_backend_with_dir() {
        let config =
            StorageConfig::from_parts(Some("file".to_string()), file_config(Some("/data/kv")));
        assert_eq!(
            config.backend,
            StorageBackend::File(PathBuf::from("/data/kv"))
        );
    }

    #[test]
    fn test_memory_backend_ignores_dir() {
        let config =
            StorageConfig::from_parts(Some(" Memory ".to_string()), file_config(Some("/data/kv")));
        assert_eq!(config.backend, StorageBackend::Memory);
    }

    #[test]
    fn test_unknown_backend_falls_back_to_file() {
        let config = StorageConfig::from_parts(Some("redis".to_string()), file_config(None));
        assert_eq!(config, StorageConfig::default());
    }
}
