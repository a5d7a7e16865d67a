//! Backend capability consumed by the cache
//!
//! A backend is a flat string store with exactly three primitives. It has no
//! enumeration, batching or bulk delete, and the cache never assumes it does.

mod file;
mod memory;

use std::rc::Rc;
use std::sync::Arc;

pub use file::DefaultStorage;
pub use memory::MemoryStorage;

/// Flat key-value store with get, set and remove by key
///
/// Methods take `&self` so one backend can be shared by several caches.
/// A missing key reads as `Ok(None)`, never as an error.
pub trait Storage {
    type Error: std::error::Error + 'static;

    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    fn remove_item(&self, key: &str) -> Result<(), Self::Error>;
}

impl<S: Storage + ?Sized> Storage for &S {
    type Error = S::Error;

    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), Self::Error> {
        (**self).remove_item(key)
    }
}

impl<S: Storage + ?Sized> Storage for Rc<S> {
    type Error = S::Error;

    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), Self::Error> {
        (**self).remove_item(key)
    }
}

impl<S: Storage + ?Sized> Storage for Arc<S> {
    type Error = S::Error;

    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), Self::Error> {
        (**self).remove_item(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_through<S: Storage>(storage: S) -> Option<String> {
        storage.set_item("k", "v").unwrap();
        storage.get_item("k").unwrap()
    }

    #[test]
    fn test_shared_handles_see_same_entries() {
        let storage = Arc::new(MemoryStorage::new());
        assert_eq!(write_through(Arc::clone(&storage)), Some("v".to_string()));
        assert!(storage.contains_key("k"));

        let local = Rc::new(MemoryStorage::new());
        assert_eq!(write_through(Rc::clone(&local)), Some("v".to_string()));
        assert_eq!(local.len(), 1);
    }

    #[test]
    fn test_borrowed_storage() {
        let storage = MemoryStorage::new();
        assert_eq!(write_through(&storage), Some("v".to_string()));
        (&storage).remove_item("k").unwrap();
        assert!(storage.is_empty());
    }
}
