//! In-memory key-value store.

use std::collections::HashMap;
use std::sync::Mutex;
use uhh_core::error::{Result, UhhError};
use uhh_core::storage::KeyValueStore;

/// A process-local store, the equivalent of browser storage that is wiped
/// when the process exits.
///
/// An "unavailable" store rejects every call with `StorageUnavailable`,
/// mirroring storage that has not been initialised yet.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: Mutex<HashMap<String, String>>,
    unavailable: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            unavailable: true,
        }
    }

    /// Pre-populates the store, e.g. with data written by an older release.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Mutex::new(entries),
            unavailable: false,
        }
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        if self.unavailable {
            return Err(UhhError::storage_unavailable("in-memory store is not initialised"));
        }
        self.entries
            .lock()
            .map_err(|e| UhhError::internal(format!("store lock poisoned: {}", e)))
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}
