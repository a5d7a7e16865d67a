//! Namespaced cache over a flat backend

use file_kv_store::FileStoreError;
use tracing::{debug, info, trace, warn};

use crate::config::StorageConfig;
use crate::error::{CacheError, ModuleError, Result};
use crate::registry::ManagedKeys;
use crate::storage::{DefaultStorage, Storage};

const REGISTRY_SUFFIX: &str = "_MANAGED_KEYS";
const KEY_SEPARATOR: char = '.';

/// Whether connecting a cache records its version in the backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MarkerPolicy {
    /// Write `{NAME} = version` after a connect that found a different marker.
    /// Reconnecting with the same version keeps the cached data.
    #[default]
    Persist,
    /// Never write the marker. Unless something outside the cache maintains
    /// it, every connect clears the namespace.
    External,
}

/// Identity of a cached module: upper-cased name plus version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheModule {
    name: String,
    version: String,
    marker_policy: MarkerPolicy,
}

impl CacheModule {
    /// Create a module identity. No storage is touched until connect.
    ///
    /// Names containing `.` or ending in `_MANAGED_KEYS` (after upper-casing)
    /// are rejected: their version marker or entries would land on another
    /// module's compartment or registry keys.
    pub fn new(name: &str, version: &str) -> std::result::Result<Self, ModuleError> {
        if name.trim().is_empty() {
            return Err(ModuleError::EmptyName);
        }

        let name = name.to_uppercase();
        if name.contains(KEY_SEPARATOR) || name.ends_with(REGISTRY_SUFFIX) {
            return Err(ModuleError::ReservedName { name });
        }

        Ok(Self {
            name,
            version: version.to_string(),
            marker_policy: MarkerPolicy::default(),
        })
    }

    pub fn with_marker_policy(mut self, marker_policy: MarkerPolicy) -> Self {
        self.marker_policy = marker_policy;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn marker_policy(&self) -> MarkerPolicy {
        self.marker_policy
    }

    /// Backend key holding the version marker
    pub fn namespace_key(&self) -> &str {
        &self.name
    }

    /// Backend key holding the managed-key registry
    pub fn registry_key(&self) -> String {
        format!("{}{}", self.name, REGISTRY_SUFFIX)
    }

    /// Backend key for a logical key. Does not register it.
    pub fn compartment_key(&self, key: &str) -> String {
        format!("{}{}{}", self.name, KEY_SEPARATOR, key)
    }

    /// Bind a backend, clearing the namespace if its stored version differs
    pub fn connect_storage<S: Storage>(self, storage: S) -> Result<NamespacedCache<S>, S::Error> {
        let cache = NamespacedCache {
            module: self,
            storage,
        };

        let stored = cache.stored_version()?;
        if !cache.is_current(stored.as_deref()) {
            info!(
                namespace = %cache.module.name,
                stored_version = ?stored,
                version = %cache.module.version,
                "Cache version changed, invalidating namespace"
            );
            cache.clear()?;

            if cache.module.marker_policy == MarkerPolicy::Persist {
                cache
                    .storage
                    .set_item(cache.module.namespace_key(), &cache.module.version)
                    .map_err(CacheError::Storage)?;
                debug!(
                    namespace = %cache.module.name,
                    version = %cache.module.version,
                    "Recorded cache version marker"
                );
            }
        }

        Ok(cache)
    }

    /// Bind the backend selected by [`StorageConfig::from_env`]
    pub fn connect_default_storage(
        self,
    ) -> Result<NamespacedCache<DefaultStorage>, FileStoreError> {
        self.connect_configured_storage(&StorageConfig::from_env())
    }

    /// Bind the backend described by `config`
    pub fn connect_configured_storage(
        self,
        config: &StorageConfig,
    ) -> Result<NamespacedCache<DefaultStorage>, FileStoreError> {
        let storage = DefaultStorage::from_config(config).map_err(CacheError::Storage)?;
        self.connect_storage(storage)
    }
}

/// A module's compartment inside a shared backend
#[derive(Debug)]
pub struct NamespacedCache<S> {
    module: CacheModule,
    storage: S,
}

impl<S: Storage> NamespacedCache<S> {
    pub fn module(&self) -> &CacheModule {
        &self.module
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Read the value stored under `key`.
    ///
    /// Registers the compartment key as a side effect, like every operation
    /// that touches a key.
    pub fn get_item(&self, key: &str) -> Result<Option<String>, S::Error> {
        let managed = self.managed_key(key)?;
        self.storage.get_item(&managed).map_err(CacheError::Storage)
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<(), S::Error> {
        let managed = self.managed_key(key)?;
        self.storage
            .set_item(&managed, value)
            .map_err(CacheError::Storage)
    }

    pub fn remove_item(&self, key: &str) -> Result<(), S::Error> {
        let managed = self.managed_key(key)?;
        self.storage
            .remove_item(&managed)
            .map_err(CacheError::Storage)
    }

    /// Remove every registered key, then the registry itself.
    ///
    /// Stops at the first backend failure; entries not yet removed stay put.
    pub fn clear(&self) -> Result<(), S::Error> {
        let keys = self.managed_keys()?;
        for key in keys.iter() {
            self.storage.remove_item(key).map_err(CacheError::Storage)?;
        }
        self.storage
            .remove_item(&self.module.registry_key())
            .map_err(CacheError::Storage)?;

        debug!(
            namespace = %self.module.name,
            removed = keys.len(),
            "Cleared namespace"
        );
        Ok(())
    }

    /// True when the stored version marker is missing or differs from ours
    pub fn should_invalidate(&self) -> Result<bool, S::Error> {
        let stored = self.stored_version()?;
        Ok(!self.is_current(stored.as_deref()))
    }

    /// Decode the registry. A malformed registry reads as empty.
    pub fn managed_keys(&self) -> Result<ManagedKeys, S::Error> {
        let raw = self
            .storage
            .get_item(&self.module.registry_key())
            .map_err(CacheError::Storage)?;

        Ok(ManagedKeys::decode(raw.as_deref()).unwrap_or_else(|e| {
            warn!(
                namespace = %self.module.name,
                error = %e,
                "Malformed managed-key registry, treating as empty"
            );
            ManagedKeys::default()
        }))
    }

    fn stored_version(&self) -> Result<Option<String>, S::Error> {
        self.storage
            .get_item(self.module.namespace_key())
            .map_err(CacheError::Storage)
    }

    fn is_current(&self, stored: Option<&str>) -> bool {
        stored == Some(self.module.version.as_str())
    }

    /// Derive the compartment key for `key`, add it to the registry and
    /// write the registry back
    fn managed_key(&self, key: &str) -> Result<String, S::Error> {
        let managed = self.module.compartment_key(key);

        let mut keys = self.managed_keys()?;
        if keys.insert(managed.clone()) {
            trace!(namespace = %self.module.name, key = %managed, "Registered managed key");
        }
        self.storage
            .set_item(&self.module.registry_key(), &keys.encode()?)
            .map_err(CacheError::Storage)?;

        Ok(managed)
    }
}
