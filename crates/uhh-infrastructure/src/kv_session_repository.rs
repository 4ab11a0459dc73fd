//! Key-value backed SessionRepository implementation.

use crate::dto::{encode_sessions, session_index};
use crate::migration::SchemaMigrator;
use crate::storage::SessionStore;
use std::sync::Arc;
use uhh_core::clock::{Clock, ClockHandle};
use uhh_core::error::{Result, UhhError};
use uhh_core::session::{FillerWordEvent, Session, SessionRepository};

/// A repository that keeps the whole session collection as one JSON blob
/// inside a [`SessionStore`].
///
/// Every operation is a single load → modify → store cycle:
/// - Loading always goes through the [`SchemaMigrator`], so older data is
///   upgraded transparently
/// - Operations on an unknown id are no-ops and write nothing
/// - There is no locking across operations; concurrent writers lose updates
pub struct KvSessionRepository {
    store: SessionStore,
    migrator: Arc<SchemaMigrator>,
    clock: ClockHandle,
}

impl KvSessionRepository {
    pub fn new(store: SessionStore, migrator: Arc<SchemaMigrator>, clock: ClockHandle) -> Self {
        Self {
            store,
            migrator,
            clock,
        }
    }

    fn load(&self) -> Result<Vec<Session>> {
        self.migrator.load(&self.store)
    }

    fn save(&self, sessions: &[Session]) -> Result<()> {
        self.store.store_sessions(&encode_sessions(sessions)?)
    }

    /// Applies `update` to the session with `session_id` and saves the collection.
    ///
    /// Returns `false` (and writes nothing) when no such session exists.
    fn update<F>(&self, session_id: &str, update: F) -> Result<bool>
    where
        F: FnOnce(&mut Session),
    {
        let mut sessions = self.load()?;
        let Some(session) = sessions.iter_mut().find(|s| s.id == session_id) else {
            tracing::debug!("Session '{}' not found, nothing to update", session_id);
            return Ok(false);
        };

        update(session);
        self.save(&sessions)?;
        Ok(true)
    }
}

impl SessionRepository for KvSessionRepository {
    fn list_sessions(&self) -> Result<Vec<Session>> {
        self.load()
    }

    fn create_session(&self, name: &str) -> Result<Session> {
        let name = name.trim();
        if name.is_empty() {
            return Err(UhhError::invalid_argument("session name must not be empty"));
        }

        let mut sessions = self.load()?;
        let session = Session {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            start_time: self.clock.now_ms(),
            end_time: None,
            events: Vec::new(),
            index: session_index(sessions.len())?,
        };
        sessions.push(session.clone());
        self.save(&sessions)?;

        tracing::debug!(
            "Created session: id={}, name={}, index={}",
            session.id,
            session.name,
            session.index
        );
        Ok(session)
    }

    fn append_filler_word_event(&self, session_id: &str) -> Result<()> {
        let now = self.clock.now_ms();
        self.update(session_id, |session| {
            session.events.push(FillerWordEvent::uhh(now));
        })?;
        Ok(())
    }

    fn end_session(&self, session_id: &str, at: Option<i64>) -> Result<()> {
        let at = at.unwrap_or_else(|| self.clock.now_ms());
        self.update(session_id, |session| {
            if at < session.start_time {
                tracing::warn!(
                    "End time {} precedes start {} of session '{}', clamping",
                    at,
                    session.start_time,
                    session.id
                );
            }
            session.end_time = Some(at.max(session.start_time));
        })?;
        Ok(())
    }

    fn delete_session(&self, session_id: &str) -> Result<()> {
        let mut sessions = self.load()?;
        let before = sessions.len();
        sessions.retain(|s| s.id != session_id);

        if sessions.len() == before {
            tracing::debug!("Session '{}' not found, nothing to delete", session_id);
            return Ok(());
        }
        self.save(&sessions)
    }

    fn delete_all_sessions(&self) -> Result<()> {
        self.save(&[])
    }
}
