//! File-per-key store implementation

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, trace};

use crate::error::{FileStoreError, Result};
use crate::types::{FileStoreConfig, StoreStats};

const VALUE_EXT: &str = "val";
const TEMP_EXT: &str = "tmp";

/// Flat string store keeping each value in its own file under `root`
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn from_config(config: &FileStoreConfig) -> Self {
        Self::new(config.root.clone())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root directory if it does not exist yet
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        debug!(root = ?self.root, "File store initialized");
        Ok(())
    }

    /// Read the value stored at `key`, `None` when nothing is stored
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.value_path(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!(key = %key, "File store miss");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| FileStoreError::InvalidUtf8 {
                key: key.to_string(),
            })
    }

    /// Store `value` at `key`, replacing any previous value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.value_path(key);
        let temp_path = path.with_extension(TEMP_EXT);

        // Readers only ever observe the old or the new file
        fs::write(&temp_path, value.as_bytes())?;
        if let Err(e) = fs::rename(&temp_path, &path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        trace!(key = %key, size = value.len(), "File store write");
        Ok(())
    }

    /// Remove the value stored at `key`; removing a missing key succeeds
    pub fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.value_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Count stored values and their total size on disk
    pub fn stats(&self) -> Result<StoreStats> {
        let mut stats = StoreStats::default();

        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(stats),
            Err(e) => return Err(e.into()),
        };

        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(VALUE_EXT) {
                continue;
            }
            stats.entries += 1;
            stats.total_size += entry.metadata()?.len();
        }

        Ok(stats)
    }

    fn value_path(&self, key: &str) -> PathBuf {
        let digest = Sha256::digest(key.as_bytes());
        self.root.join(format!("{}.{}", hex::encode(digest), VALUE_EXT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn create_store() -> (tempfile::TempDir, FileStore) {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("kv"));
        store.init().unwrap();
        (dir, store)
    }

    #[test]
    fn test_get_missing_key() {
        let (_dir, store) = create_store();
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let (_dir, store) = create_store();
        store.set("UNITTEST.foo", "bar").unwrap();
        assert_eq!(store.get("UNITTEST.foo").unwrap(), Some("bar".to_string()));
    }

    #[test]
    fn test_set_overwrites() {
        let (_dir, store) = create_store();
        store.set("foo", "bar").unwrap();
        store.set("foo", "baz").unwrap();
        assert_eq!(store.get("foo").unwrap(), Some("baz".to_string()));
        assert_eq!(store.stats().unwrap().entries, 1);
    }

    #[test]
    fn test_empty_value_is_not_absent() {
        let (_dir, store) = create_store();
        store.set("foo", "").unwrap();
        assert_eq!(store.get("foo").unwrap(), Some(String::new()));
    }

    #[test]
    fn test_remove() {
        let (_dir, store) = create_store();
        store.set("foo", "bar").unwrap();
        store.remove("foo").unwrap();
        assert_eq!(store.get("foo").unwrap(), None);
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let (_dir, store) = create_store();
        assert!(store.remove("never-written").is_ok());
    }

    #[test]
    fn test_keys_with_path_characters() {
        let (_dir, store) = create_store();
        let key = "../UNITTEST/with spaces/and:colons";
        store.set(key, "value").unwrap();
        assert_eq!(store.get(key).unwrap(), Some("value".to_string()));
        assert_eq!(store.stats().unwrap().entries, 1);
    }

    #[test]
    fn test_values_survive_new_store_instance() {
        let (dir, store) = create_store();
        store.set("foo", "bar").unwrap();
        drop(store);

        let reopened = FileStore::new(dir.path().join("kv"));
        assert_eq!(reopened.get("foo").unwrap(), Some("bar".to_string()));
    }

    #[test]
    fn test_invalid_utf8_is_reported() {
        let (_dir, store) = create_store();
        fs::write(store.value_path("binary"), [0xff, 0xfe, 0x00]).unwrap();

        match store.get("binary") {
            Err(FileStoreError::InvalidUtf8 { key }) => assert_eq!(key, "binary"),
            other => panic!("expected InvalidUtf8, got {:?}", other),
        }
    }

    #[test]
    fn test_stats() {
        let (_dir, store) = create_store();
        store.set("a", "12345").unwrap();
        store.set("b", "678").unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.entries, 2);
        assert_eq!(stats.total_size, 8);
    }

    #[test]
    fn test_stats_without_root() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("does-not-exist"));
        assert_eq!(store.stats().unwrap(), StoreStats::default());
    }

    #[test]
    fn test_from_config() {
        let config = FileStoreConfig {
            root: PathBuf::from("/tmp/kv-test"),
        };
        let store = FileStore::from_config(&config);
        assert_eq!(store.root(), Path::new("/tmp/kv-test"));
    }
}
