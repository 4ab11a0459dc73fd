//! Logical view of the key-value store used by the session collection.

use std::sync::Arc;
use uhh_core::error::Result;
use uhh_core::storage::{CLOSED_AT_KEY, KeyValueStore, SCHEMA_VERSION_KEY, SESSIONS_KEY};

/// Named accessors over a [`KeyValueStore`].
///
/// This is where an unavailable backend is absorbed: reads report "absent"
/// and writes are dropped, each with a warning. Every other error is passed
/// through.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(inner: Arc<dyn KeyValueStore>) -> Self {
        Self { inner }
    }

    pub fn load_sessions(&self) -> Result<Option<String>> {
        self.read(SESSIONS_KEY)
    }

    pub fn store_sessions(&self, blob: &str) -> Result<()> {
        self.write(SESSIONS_KEY, blob)
    }

    pub fn load_version(&self) -> Result<Option<String>> {
        self.read(SCHEMA_VERSION_KEY)
    }

    pub fn store_version(&self, version: &str) -> Result<()> {
        self.write(SCHEMA_VERSION_KEY, version)
    }

    /// Last recorded close time. A value that isn't an integer counts as absent.
    pub fn load_closed_at(&self) -> Result<Option<i64>> {
        let Some(raw) = self.read(CLOSED_AT_KEY)? else {
            return Ok(None);
        };
        match raw.trim().parse::<i64>() {
            Ok(ms) => Ok(Some(ms)),
            Err(e) => {
                tracing::warn!(value = %raw, error = %e, "ignoring unparsable closedAt");
                Ok(None)
            }
        }
    }

    pub fn store_closed_at(&self, at_ms: i64) -> Result<()> {
        self.write(CLOSED_AT_KEY, &at_ms.to_string())
    }

    fn read(&self, key: &str) -> Result<Option<String>> {
        match self.inner.get(key) {
            Err(e) if e.is_storage_unavailable() => {
                tracing::warn!(key, error = %e, "storage unavailable, treating value as absent");
                Ok(None)
            }
            other => other,
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        match self.inner.set(key, value) {
            Err(e) if e.is_storage_unavailable() => {
                tracing::warn!(key, error = %e, "storage unavailable, dropping write");
                Ok(())
            }
            other => other,
        }
    }
}
