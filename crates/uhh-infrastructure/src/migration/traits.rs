//! Core traits for the migration framework.

use anyhow::Result;
use semver::Version;

/// Base trait for all migrations.
///
/// Provides version information and metadata about a migration step.
pub trait Migration: Send + Sync {
    /// Returns the source version this migration starts from.
    fn from_version(&self) -> Version;

    /// Returns the target version this migration produces.
    fn to_version(&self) -> Version;

    /// Returns a human-readable description of this migration.
    ///
    /// Used for logging and debugging purposes.
    fn description(&self) -> &str;
}

/// A migration that transforms data in place, keeping its type.
///
/// Steps run on every load, including against data that has already been
/// upgraded, so `migrate(migrate(x)) == migrate(x)` must hold.
pub trait TypedMigration<T>: Migration + std::fmt::Debug {
    /// Executes the migration.
    ///
    /// # Errors
    ///
    /// Returns an error if the migration cannot be completed successfully.
    fn migrate(&self, data: T) -> Result<T>;
}
