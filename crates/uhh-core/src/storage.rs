//! Persistence adapter boundary.
//!
//! The core only ever needs a string key-value store, the same shape as
//! browser `localStorage`. Values are opaque: encoding and decoding belong to
//! the repository and the migrator.

use crate::error::Result;

/// Key holding the JSON-encoded session collection.
pub const SESSIONS_KEY: &str = "filler-word-sessions";
/// Key holding the schema version marker (absent = pre-1 schema).
pub const SCHEMA_VERSION_KEY: &str = "version";
/// Key holding the epoch-ms timestamp of the last time the app was hidden.
pub const CLOSED_AT_KEY: &str = "closedAt";

/// A synchronous string key-value store.
///
/// Implementations report an unreachable backend as
/// `UhhError::StorageUnavailable`. They perform no validation of values.
pub trait KeyValueStore: Send + Sync {
    /// Reads `key`, `Ok(None)` if it was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`; removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
