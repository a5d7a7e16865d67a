//! Namespaced, version-aware cache over a flat key-value store
//!
//! A [`CacheModule`] names a logical owner of cached strings and the version
//! of its data. Connecting it to a [`Storage`] backend yields a
//! [`NamespacedCache`] whose keys are prefixed with the upper-cased module
//! name. Every prefixed key is tracked in a registry stored in the same
//! backend, so the whole namespace can be cleared on a backend that offers
//! nothing but get, set and remove. A version change wipes the namespace on
//! connect.
//!
//! Backend layout for a module named `unittest`:
//!
//! | Key | Contents |
//! |---|---|
//! | `UNITTEST` | version marker |
//! | `UNITTEST_MANAGED_KEYS` | JSON array of managed keys |
//! | `UNITTEST.{key}` | cached value |

pub mod cache;
pub mod config;
pub mod error;
pub mod registry;
pub mod storage;

pub use cache::{CacheModule, MarkerPolicy, NamespacedCache};
pub use config::{StorageBackend, StorageConfig};
pub use error::{CacheError, ModuleError, Result};
pub use registry::ManagedKeys;
pub use storage::{DefaultStorage, MemoryStorage, Storage};
