//! File-based key-value store
//!
//! Stores string values on disk, one file per key, behind three primitives:
//! get, set and remove. There is no enumeration, bulk delete or expiry.

mod error;
mod store;
mod types;

pub use error::{FileStoreError, Result};
pub use store::FileStore;
pub use types::{FileStoreConfig, StoreStats};
