//! Migration registry for managing linear migration chains.
//!
//! Every version migrates through all intermediate versions; steps are never
//! skipped.

use super::traits::TypedMigration;
use anyhow::{Context, Result};
use semver::Version;
use std::sync::Arc;

/// Result of running data through the chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Migrated<T> {
    pub data: T,
    /// Number of steps that ran; zero means the data was already current.
    pub steps_applied: usize,
}

/// Registry for managing a linear chain of migrations.
///
/// Migrations are stored in order and must form a continuous chain:
/// 0.0.0 → 1.0.0 → 2.0.0 → ...
#[derive(Debug)]
pub struct MigrationRegistry<T> {
    /// Migrations in order, forming a linear chain.
    migrations: Vec<Arc<dyn TypedMigration<T>>>,
    /// The latest version this registry can migrate to.
    latest_version: Version,
}

impl<T> MigrationRegistry<T> {
    pub fn new(latest_version: Version) -> Self {
        Self {
            migrations: Vec::new(),
            latest_version,
        }
    }

    /// Registers a single migration, validating chain continuity.
    ///
    /// # Panics
    ///
    /// Panics if the migration doesn't connect to the existing chain, or if
    /// it targets a version beyond the registry's latest version.
    pub fn register(&mut self, migration: Arc<dyn TypedMigration<T>>) {
        if let Some(last) = self.migrations.last() {
            assert_eq!(
                last.to_version(),
                migration.from_version(),
                "Migration chain broken: expected migration from {} (previous to_version), but got migration from {}. \
                 Description: '{}' (previous) -> '{}' (current)",
                last.to_version(),
                migration.from_version(),
                last.description(),
                migration.description()
            );
        }

        assert!(
            migration.from_version() < migration.to_version(),
            "Migration '{}' does not move forward ({} -> {})",
            migration.description(),
            migration.from_version(),
            migration.to_version()
        );

        if migration.to_version() > self.latest_version {
            panic!(
                "Migration target version {} exceeds registry's latest version {}",
                migration.to_version(),
                self.latest_version
            );
        }

        self.migrations.push(migration);
    }

    /// Registers multiple migrations at once, in order.
    pub fn register_all(&mut self, migrations: Vec<Arc<dyn TypedMigration<T>>>) {
        for migration in migrations {
            self.register(migration);
        }
    }

    pub fn latest_version(&self) -> &Version {
        &self.latest_version
    }

    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    /// Folds `data` through every step whose target is newer than `current_version`.
    ///
    /// Data already at (or beyond) the latest version passes through untouched.
    pub fn migrate_to_latest(&self, data: T, current_version: &Version) -> Result<Migrated<T>> {
        if current_version >= &self.latest_version {
            tracing::debug!(
                "Data is at version {} (latest {}), no migration needed",
                current_version,
                self.latest_version
            );
            return Ok(Migrated {
                data,
                steps_applied: 0,
            });
        }

        let pending: Vec<_> = self
            .migrations
            .iter()
            .filter(|m| &m.to_version() > current_version)
            .collect();

        tracing::info!(
            "Starting migration from {} to {} ({} steps)",
            current_version,
            self.latest_version,
            pending.len()
        );

        let total = pending.len();
        let data = pending
            .into_iter()
            .enumerate()
            .try_fold(data, |data, (i, migration)| {
                tracing::info!(
                    "Migration step {}/{}: {} -> {} ({})",
                    i + 1,
                    total,
                    migration.from_version(),
                    migration.to_version(),
                    migration.description()
                );
                migration.migrate(data).with_context(|| {
                    format!(
                        "Migration failed at step {}: {} -> {}",
                        i + 1,
                        migration.from_version(),
                        migration.to_version()
                    )
                })
            })?;

        Ok(Migrated {
            data,
            steps_applied: total,
        })
    }
}
