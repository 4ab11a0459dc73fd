//! Session collection migrations.
//!
//! Each step handles one schema transition of the stored collection.

use super::traits::{Migration, TypedMigration};
use crate::dto::{SessionRecord, session_index};
use anyhow::Result;
use semver::Version;

/// Migration from the pre-1 schema (0.0.0) to schema 1 (1.0.0).
///
/// Changes:
/// - Add `index`: every session without one gets its position in stored order
///
/// Sessions that already have an index keep it, which makes the step a no-op
/// on data that has been migrated before.
#[derive(Debug, Default)]
pub struct AssignSessionIndexMigration;

impl Migration for AssignSessionIndexMigration {
    fn from_version(&self) -> Version {
        Version::new(0, 0, 0)
    }

    fn to_version(&self) -> Version {
        Version::new(1, 0, 0)
    }

    fn description(&self) -> &str {
        "Assign 'index' from stored order to sessions that lack one"
    }
}

impl TypedMigration<Vec<SessionRecord>> for AssignSessionIndexMigration {
    fn migrate(&self, records: Vec<SessionRecord>) -> Result<Vec<SessionRecord>> {
        Ok(fill_missing_indexes(records)?)
    }
}

/// Gives every record without an index its position in the collection.
pub(crate) fn fill_missing_indexes(
    records: Vec<SessionRecord>,
) -> uhh_core::Result<Vec<SessionRecord>> {
    records
        .into_iter()
        .enumerate()
        .map(|(position, mut record)| {
            if record.index.is_none() {
                let index = session_index(position)?;
                tracing::debug!("Assigned index {} to session '{}'", index, record.id);
                record.index = Some(index);
            }
            Ok(record)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, index: Option<u32>) -> SessionRecord {
        SessionRecord {
            id: id.to_string(),
            name: format!("Session {}", id),
            start_time: 0,
            end_time: Some(1),
            events: Vec::new(),
            index,
        }
    }

    #[test]
    fn test_assigns_positions_in_order() {
        let migrated = AssignSessionIndexMigration
            .migrate(vec![record("a", None), record("b", None), record("c", None)])
            .unwrap();
        let indexes: Vec<_> = migrated.iter().map(|r| r.index).collect();
        assert_eq!(indexes, vec![Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn test_existing_indexes_are_kept() {
        let migrated = AssignSessionIndexMigration
            .migrate(vec![record("a", Some(5)), record("b", None)])
            .unwrap();
        assert_eq!(migrated[0].index, Some(5));
        assert_eq!(migrated[1].index, Some(1));
    }

    #[test]
    fn test_idempotent() {
        let input = vec![record("a", None), record("b", Some(9)), record("c", None)];
        let once = AssignSessionIndexMigration.migrate(input).unwrap();
        let twice = AssignSessionIndexMigration.migrate(once.clone()).unwrap();
        assert_eq!(once, twice);
    }
}
