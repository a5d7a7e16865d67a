//! Managed-key registry
//!
//! The registry lists every compartment key a namespace has handed out. It is
//! stored as a JSON array next to the values it tracks and is the only way to
//! clear a namespace on a backend without enumeration.

use serde::{Deserialize, Serialize};

/// Ordered set of compartment keys, in first-registered order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManagedKeys(Vec<String>);

impl ManagedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a stored registry. Absent or blank input is an empty registry;
    /// duplicate entries collapse to their first occurrence.
    pub fn decode(raw: Option<&str>) -> serde_json::Result<Self> {
        let raw = match raw {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Ok(Self::default()),
        };

        let listed: Vec<String> = serde_json::from_str(raw)?;
        Ok(listed.into_iter().collect())
    }

    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Add `key` unless already present; returns whether it was added
    pub fn insert(&mut self, key: String) -> bool {
        if self.contains(&key) {
            return false;
        }
        self.0.push(key);
        true
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|k| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for ManagedKeys {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut keys = Self::default();
        for key in iter {
            keys.insert(key);
        }
        keys
    }
}
