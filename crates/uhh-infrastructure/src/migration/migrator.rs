//! Schema migrator for the stored session collection.
//!
//! Reads the collection and its version marker, folds the records through the
//! session migration chain, and writes the upgraded collection back only when
//! a step actually ran.

use super::registry::MigrationRegistry;
use super::session::{AssignSessionIndexMigration, fill_missing_indexes};
use super::traits::TypedMigration;
use crate::dto::{SESSION_SCHEMA_MARKER, SessionRecord, SessionV1, decode_records, encode_sessions};
use crate::storage::SessionStore;
use semver::Version;
use std::sync::Arc;
use uhh_core::error::Result;
use uhh_core::session::Session;

/// A schema version marker as found in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredVersion {
    /// No marker: the pre-1 schema
    Absent,
    Known(Version),
    /// Something this release cannot interpret
    Unrecognized(String),
}

impl StoredVersion {
    /// Interprets a marker. `"1"` means `1.0.0`; full semver strings are accepted too.
    pub fn parse(marker: Option<&str>) -> Self {
        let Some(raw) = marker else {
            return StoredVersion::Absent;
        };
        let trimmed = raw.trim();
        if let Ok(major) = trimmed.parse::<u64>() {
            return StoredVersion::Known(Version::new(major, 0, 0));
        }
        match Version::parse(trimmed) {
            Ok(version) => StoredVersion::Known(version),
            Err(_) => StoredVersion::Unrecognized(raw.to_string()),
        }
    }
}

/// Outcome of migrating one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationOutcome {
    pub sessions: Vec<Session>,
    /// True when at least one step ran and the result must be persisted.
    pub upgraded: bool,
}

/// Upgrades stored collections to the current schema.
#[derive(Debug)]
pub struct SchemaMigrator {
    registry: MigrationRegistry<Vec<SessionRecord>>,
}

impl SchemaMigrator {
    /// Builds the migrator with every known session migration, in order.
    pub fn new() -> Self {
        let mut registry = MigrationRegistry::new(Self::latest_version());
        let steps: Vec<Arc<dyn TypedMigration<Vec<SessionRecord>>>> =
            vec![Arc::new(AssignSessionIndexMigration)];
        registry.register_all(steps);
        Self { registry }
    }

    pub fn latest_version() -> Version {
        Version::new(1, 0, 0)
    }

    /// Marker written next to an upgraded collection.
    pub fn latest_marker() -> &'static str {
        SESSION_SCHEMA_MARKER
    }

    /// Migrates decoded records. Pure; persisting is up to the caller.
    ///
    /// Unrecognized or future markers are treated as "nothing to do". Records
    /// that still lack an index in that case get their position in memory so
    /// they can be represented, but `upgraded` stays false.
    pub fn migrate(
        &self,
        records: Vec<SessionRecord>,
        marker: Option<&str>,
    ) -> Result<MigrationOutcome> {
        let (records, upgraded) = match StoredVersion::parse(marker) {
            StoredVersion::Unrecognized(raw) => {
                tracing::warn!(marker = %raw, "unrecognized schema version marker, skipping migration");
                (fill_missing_indexes(records)?, false)
            }
            StoredVersion::Known(version) if &version > self.registry.latest_version() => {
                tracing::debug!(
                    "Stored schema {} is newer than supported {}, skipping migration",
                    version,
                    self.registry.latest_version()
                );
                (fill_missing_indexes(records)?, false)
            }
            stored => {
                let current = match stored {
                    StoredVersion::Known(version) => version,
                    _ => Version::new(0, 0, 0),
                };
                let migrated = self.registry.migrate_to_latest(records, &current)?;
                (migrated.data, migrated.steps_applied > 0)
            }
        };

        let sessions = records
            .into_iter()
            .map(|record| SessionV1::try_from(record).map(Session::from))
            .collect::<Result<Vec<_>>>()?;

        Ok(MigrationOutcome { sessions, upgraded })
    }

    /// Loads the collection from `store`, migrating and persisting it if needed.
    ///
    /// A missing collection is an empty one and causes no writes.
    pub fn load(&self, store: &SessionStore) -> Result<Vec<Session>> {
        let Some(blob) = store.load_sessions()? else {
            return Ok(Vec::new());
        };

        let records = decode_records(&blob)?;
        let marker = store.load_version()?;
        let outcome = self.migrate(records, marker.as_deref())?;

        if outcome.upgraded {
            store.store_sessions(&encode_sessions(&outcome.sessions)?)?;
            store.store_version(Self::latest_marker())?;
            tracing::info!(
                from = marker.as_deref().unwrap_or("<none>"),
                to = Self::latest_marker(),
                sessions = outcome.sessions.len(),
                "migrated stored sessions"
            );
        }

        Ok(outcome.sessions)
    }
}

impl Default for SchemaMigrator {
    fn default() -> Self {
        Self::new()
    }
}
