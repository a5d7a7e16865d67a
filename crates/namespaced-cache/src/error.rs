//! Error types for the namespaced cache

use std::fmt;

/// Errors from cache operations, generic over the backend's error type
#[derive(Debug)]
pub enum CacheError<E> {
    /// The backend failed; the error is passed through untouched
    Storage(E),
    /// The managed-key registry could not be encoded
    Registry(serde_json::Error),
}

impl<E> CacheError<E> {
    /// Recover the backend error, if this is one
    pub fn into_storage(self) -> Option<E> {
        match self {
            CacheError::Storage(err) => Some(err),
            CacheError::Registry(_) => None,
        }
    }
}

impl<E: fmt::Display> fmt::Display for CacheError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::Storage(err) => write!(f, "Storage error: {}", err),
            CacheError::Registry(err) => write!(f, "Registry encoding error: {}", err),
        }
    }
}

impl<E> std::error::Error for CacheError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CacheError::Storage(err) => Some(err),
            CacheError::Registry(err) => Some(err),
        }
    }
}

impl<E> From<serde_json::Error> for CacheError<E> {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Registry(err)
    }
}

pub type Result<T, E> = std::result::Result<T, CacheError<E>>;

/// Errors from building a [`crate::CacheModule`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleError {
    EmptyName,
    /// Name would make this module's keys overlap another module's keys
    ReservedName { name: String },
}

impl fmt::Display for ModuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleError::EmptyName => write!(f, "Module name must not be empty"),
            ModuleError::ReservedName { name } => write!(
                f,
                "Module name {:?} contains '.' or ends with \"_MANAGED_KEYS\"",
                name
            ),
        }
    }
}

impl std::error::Error for ModuleError {}
