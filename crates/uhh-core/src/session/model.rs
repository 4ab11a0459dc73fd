//! Session domain model.
//!
//! This module contains the core `Session` entity and the filler word events
//! recorded against it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Wire tag of the only kind this crate produces.
const UHH_TAG: &str = "uhh";

/// The kind of disfluency an event records.
///
/// Only `"uhh"` is produced by this crate. Tags written by some other client
/// are kept verbatim in `Other` so they survive a rewrite of the collection,
/// and are ignored by the statistics engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FillerWordKind {
    Uhh,
    Other(String),
}

impl FillerWordKind {
    /// The tag as stored in the `type` field.
    pub fn as_str(&self) -> &str {
        match self {
            FillerWordKind::Uhh => UHH_TAG,
            FillerWordKind::Other(tag) => tag,
        }
    }
}

impl From<String> for FillerWordKind {
    fn from(tag: String) -> Self {
        if tag == UHH_TAG {
            FillerWordKind::Uhh
        } else {
            FillerWordKind::Other(tag)
        }
    }
}

impl Serialize for FillerWordKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FillerWordKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(FillerWordKind::from)
    }
}

/// A single user-logged filler word, stamped in epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillerWordEvent {
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub kind: FillerWordKind,
}

impl FillerWordEvent {
    /// Creates an "uhh" event at the given time.
    pub fn uhh(timestamp: i64) -> Self {
        Self {
            timestamp,
            kind: FillerWordKind::Uhh,
        }
    }
}

/// One timed speaking interval during which filler words are logged.
///
/// This is the "pure" domain model business logic operates on, independent
/// of any particular storage version. A session is *active* while `end_time`
/// is `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Unique session identifier (UUID format)
    pub id: String,
    /// Human-readable session name, never blank
    pub name: String,
    /// Epoch milliseconds when the session was started
    pub start_time: i64,
    /// Epoch milliseconds when the session was ended, `None` while active
    pub end_time: Option<i64>,
    /// Logged filler words in the order they were recorded
    pub events: Vec<FillerWordEvent>,
    /// Creation order (count of sessions that existed when this one was created)
    pub index: u32,
}

impl Session {
    pub fn is_active(&self) -> bool {
        self.end_time.is_none()
    }
}

/// Returns the first session that has not been ended yet.
pub fn find_active_session(sessions: &[Session]) -> Option<&Session> {
    sessions.iter().find(|s| s.is_active())
}
