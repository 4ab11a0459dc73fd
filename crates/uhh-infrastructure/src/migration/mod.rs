//! Schema migration framework.
//!
//! Stored collections are upgraded through a linear chain of version-tagged
//! steps:
//!
//! - Every step is registered in order and validated to connect to the
//!   previous one
//! - Upgrading is a fold over the steps newer than the stored version
//! - Every step is idempotent, because migration runs on every load
//! - Unknown or future version markers are left alone
//!
//! ```text
//!  stored marker      MigrationRegistry<Vec<SessionRecord>>
//!  (absent = 0.0.0) ─► AssignSessionIndexMigration (0.0.0 → 1.0.0) ─► SessionV1 ─► Session
//! ```
//!
//! # Adding a step
//!
//! 1. Add the new DTO shape in `dto/session.rs` and bump `SESSION_SCHEMA_MARKER`
//! 2. Implement `Migration` + `TypedMigration<Vec<SessionRecord>>` in `session.rs`
//! 3. Register it in `SchemaMigrator::new()` and bump `latest_version()`

mod migrator;
mod registry;
mod session;
mod traits;

pub use migrator::{MigrationOutcome, SchemaMigrator, StoredVersion};
pub use registry::{Migrated, MigrationRegistry};
pub use session::AssignSessionIndexMigration;
pub use traits::{Migration, TypedMigration};
