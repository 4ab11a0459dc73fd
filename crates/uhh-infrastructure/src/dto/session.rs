//! Session DTOs.
//!
//! Two shapes exist on the wire:
//!
//! - pre-1: first release, sessions without an `index`
//! - 1: every session carries `index` (creation order)
//!
//! Stored collections are always decoded as [`SessionRecord`], which accepts
//! both. After migration every record has an index and converts into the
//! canonical [`SessionV1`], which is the only shape ever written.

use serde::{Deserialize, Serialize};
use uhh_core::error::{Result, UhhError};
use uhh_core::session::{FillerWordEvent, Session};

/// Latest schema version marker written next to the collection.
pub const SESSION_SCHEMA_MARKER: &str = "1";

/// Latest timestamp accepted from storage: 9999-12-31T23:59:59.999Z.
pub const MAX_TIMESTAMP_MS: i64 = 253_402_300_799_999;

/// Converts a position in the collection into a session index.
pub fn session_index(position: usize) -> Result<u32> {
    u32::try_from(position).map_err(|_| {
        UhhError::malformed(format!(
            "session position {} does not fit a session index",
            position
        ))
    })
}

/// A loosely-typed stored session, as found before migration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: String,
    pub name: String,
    pub start_time: i64,
    #[serde(default)]
    pub end_time: Option<i64>,
    #[serde(default)]
    pub events: Vec<FillerWordEvent>,
    /// Missing in the pre-1 schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

/// Version 1 of the stored session schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionV1 {
    pub id: String,
    pub name: String,
    pub start_time: i64,
    pub end_time: Option<i64>,
    pub events: Vec<FillerWordEvent>,
    pub index: u32,
}

impl TryFrom<SessionRecord> for SessionV1 {
    type Error = UhhError;

    fn try_from(record: SessionRecord) -> Result<Self> {
        let index = record.index.ok_or_else(|| {
            UhhError::malformed(format!(
                "session '{}' has no index but is stored as schema 1",
                record.id
            ))
        })?;
        Ok(SessionV1 {
            id: record.id,
            name: record.name,
            start_time: record.start_time,
            end_time: record.end_time,
            events: record.events,
            index,
        })
    }
}

/// Convert SessionV1 DTO to domain model.
impl From<SessionV1> for Session {
    fn from(dto: SessionV1) -> Self {
        Session {
            id: dto.id,
            name: dto.name,
            start_time: dto.start_time,
            end_time: dto.end_time,
            events: dto.events,
            index: dto.index,
        }
    }
}

/// Convert domain model to SessionV1 DTO for persistence.
impl From<&Session> for SessionV1 {
    fn from(session: &Session) -> Self {
        SessionV1 {
            id: session.id.clone(),
            name: session.name.clone(),
            start_time: session.start_time,
            end_time: session.end_time,
            events: session.events.clone(),
            index: session.index,
        }
    }
}

/// Decodes a stored collection blob.
///
/// Any failure is `MalformedData`; nothing is recovered from a blob that does
/// not decode as a whole.
pub fn decode_records(blob: &str) -> Result<Vec<SessionRecord>> {
    let records: Vec<SessionRecord> = serde_json::from_str(blob)
        .map_err(|e| UhhError::malformed(format!("stored sessions do not decode: {}", e)))?;
    records.iter().try_for_each(check_timestamps)?;
    Ok(records)
}

/// Every stored timestamp must lie between the epoch and [`MAX_TIMESTAMP_MS`].
fn check_timestamps(record: &SessionRecord) -> Result<()> {
    let timestamps = std::iter::once(record.start_time)
        .chain(record.end_time)
        .chain(record.events.iter().map(|e| e.timestamp));
    for ms in timestamps {
        if !(0..=MAX_TIMESTAMP_MS).contains(&ms) {
            return Err(UhhError::malformed(format!(
                "session '{}' has out-of-range timestamp {}",
                record.id, ms
            )));
        }
    }
    Ok(())
}

/// Encodes sessions in the current schema.
pub fn encode_sessions(sessions: &[Session]) -> Result<String> {
    let dtos: Vec<SessionV1> = sessions.iter().map(SessionV1::from).collect();
    Ok(serde_json::to_string(&dtos)?)
}
