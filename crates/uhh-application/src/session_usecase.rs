//! Session use case implementation.
//!
//! `SessionUseCase` is what a UI talks to. It wraps the repository, enforces
//! the "one active session" contract on start, and attaches statistics.

use serde::Serialize;
use std::sync::Arc;
use uhh_core::clock::{Clock, ClockHandle};
use uhh_core::config::ActiveSessionPolicy;
use uhh_core::error::{Result, UhhError};
use uhh_core::session::{
    Session, SessionRepository, SessionStats, compute_stats, find_active_session,
};

/// One row of the session list: the session, its stats and whether it is running.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOverview {
    pub session: Session,
    pub stats: SessionStats,
    pub is_active: bool,
}

/// Use case for managing speaking sessions.
///
/// # Responsibilities
///
/// - Starting sessions without ever having two active at once
/// - Recording filler words and ending sessions
/// - Computing statistics at the current time
pub struct SessionUseCase {
    /// Repository for session data persistence
    session_repository: Arc<dyn SessionRepository>,
    clock: ClockHandle,
    /// What `start_session` does while another session is active
    on_start_with_active: ActiveSessionPolicy,
}

impl SessionUseCase {
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        clock: ClockHandle,
        on_start_with_active: ActiveSessionPolicy,
    ) -> Self {
        Self {
            session_repository,
            clock,
            on_start_with_active,
        }
    }

    /// All sessions in stored (creation) order.
    pub fn list_sessions(&self) -> Result<Vec<Session>> {
        self.session_repository.list_sessions()
    }

    /// All sessions, most recently started first.
    pub fn list_sessions_for_display(&self) -> Result<Vec<Session>> {
        let mut sessions = self.session_repository.list_sessions()?;
        sessions.sort_by(|a, b| {
            b.start_time
                .cmp(&a.start_time)
                .then_with(|| b.index.cmp(&a.index))
        });
        Ok(sessions)
    }

    /// Starts a new session named `name`.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the name is blank
    /// - `SessionAlreadyActive` if a session is running and the policy is `Reject`
    pub fn start_session(&self, name: &str) -> Result<Session> {
        if name.trim().is_empty() {
            return Err(UhhError::invalid_argument("session name must not be empty"));
        }

        let sessions = self.session_repository.list_sessions()?;
        if let Some(active) = find_active_session(&sessions) {
            match self.on_start_with_active {
                ActiveSessionPolicy::Reject => {
                    tracing::debug!("Refusing to start '{}': '{}' is active", name, active.id);
                    return Err(UhhError::SessionAlreadyActive {
                        id: active.id.clone(),
                    });
                }
                ActiveSessionPolicy::EndCurrent => {
                    tracing::info!("Ending active session '{}' before starting a new one", active.id);
                    self.session_repository.end_session(&active.id, None)?;
                }
            }
        }

        self.session_repository.create_session(name)
    }

    /// The session with `session_id`.
    ///
    /// # Errors
    ///
    /// `NotFound` if no such session is stored.
    pub fn get_session(&self, session_id: &str) -> Result<Session> {
        self.session_repository
            .list_sessions()?
            .into_iter()
            .find(|s| s.id == session_id)
            .ok_or_else(|| UhhError::not_found("Session", session_id))
    }

    /// Logs one "uhh" in the given session at the current time.
    pub fn record_uhh(&self, session_id: &str) -> Result<()> {
        self.session_repository.append_filler_word_event(session_id)
    }

    pub fn end_session(&self, session_id: &str) -> Result<()> {
        self.session_repository.end_session(session_id, None)
    }

    pub fn delete_session(&self, session_id: &str) -> Result<()> {
        self.session_repository.delete_session(session_id)
    }

    pub fn delete_all_sessions(&self) -> Result<()> {
        tracing::info!("Deleting all sessions");
        self.session_repository.delete_all_sessions()
    }

    pub fn active_session(&self) -> Result<Option<Session>> {
        let sessions = self.session_repository.list_sessions()?;
        Ok(find_active_session(&sessions).cloned())
    }

    /// Stats for one session as of now; `None` if the id is unknown.
    pub fn stats_for(&self, session_id: &str) -> Result<Option<SessionStats>> {
        let now = self.clock.now_ms();
        Ok(self
            .session_repository
            .list_sessions()?
            .iter()
            .find(|s| s.id == session_id)
            .map(|s| compute_stats(s, now)))
    }

    /// The session list with stats, newest first.
    pub fn overview(&self) -> Result<Vec<SessionOverview>> {
        let now = self.clock.now_ms();
        Ok(self
            .list_sessions_for_display()?
            .into_iter()
            .map(|session| SessionOverview {
                stats: compute_stats(&session, now),
                is_active: session.is_active(),
                session,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uhh_core::clock::ManualClock;
    use uhh_infrastructure::storage::{InMemoryStore, SessionStore};
    use uhh_infrastructure::{KvSessionRepository, SchemaMigrator};

    fn usecase(policy: ActiveSessionPolicy) -> (SessionUseCase, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(0));
        let handle = ClockHandle::new(clock.clone());
        let repository = Arc::new(KvSessionRepository::new(
            SessionStore::new(Arc::new(InMemoryStore::new())),
            Arc::new(SchemaMigrator::new()),
            handle.clone(),
        ));
        (SessionUseCase::new(repository, handle, policy), clock)
    }

    #[test]
    fn test_reject_policy_keeps_single_active() {
        let (usecase, _) = usecase(ActiveSessionPolicy::Reject);
        let first = usecase.start_session("First").unwrap();

        let err = usecase.start_session("Second").unwrap_err();
        assert_eq!(err, UhhError::SessionAlreadyActive { id: first.id.clone() });
        assert_eq!(usecase.list_sessions().unwrap().len(), 1);
    }

    #[test]
    fn test_end_current_policy_ends_then_creates() {
        let (usecase, clock) = usecase(ActiveSessionPolicy::EndCurrent);
        let first = usecase.start_session("First").unwrap();
        clock.set(60_000);
        let second = usecase.start_session("Second").unwrap();

        let sessions = usecase.list_sessions().unwrap();
        assert_eq!(sessions[0].end_time, Some(60_000));
        assert_eq!(usecase.active_session().unwrap().map(|s| s.id), Some(second.id));
        assert_ne!(first.index, second.index);
    }

    #[test]
    fn test_blank_name_does_not_end_active_session() {
        let (usecase, _) = usecase(ActiveSessionPolicy::EndCurrent);
        let first = usecase.start_session("First").unwrap();
        assert!(usecase.start_session("  ").unwrap_err().is_invalid_argument());
        assert_eq!(usecase.active_session().unwrap().map(|s| s.id), Some(first.id));
    }

    #[test]
    fn test_talk_stats() {
        let (usecase, clock) = usecase(ActiveSessionPolicy::Reject);
        let talk = usecase.start_session("Talk").unwrap();
        clock.set(30_000);
        usecase.record_uhh(&talk.id).unwrap();
        clock.set(95_000);
        usecase.record_uhh(&talk.id).unwrap();
        clock.set(130_000);
        usecase.end_session(&talk.id).unwrap();

        let stats = usecase.stats_for(&talk.id).unwrap().unwrap();
        assert_eq!(stats.total_uhh, 2);
        assert!((stats.duration_minutes - 130.0 / 60.0).abs() < 1e-9);
        let buckets: Vec<_> = stats
            .minute_by_minute_data
            .iter()
            .map(|b| (b.minute, b.uhh))
            .collect();
        assert_eq!(buckets, vec![(1, 1), (2, 1), (3, 0)]);

        assert_eq!(usecase.stats_for("missing").unwrap(), None);
    }

    #[test]
    fn test_overview_is_newest_first() {
        let (usecase, clock) = usecase(ActiveSessionPolicy::Reject);
        let old = usecase.start_session("Old").unwrap();
        usecase.end_session(&old.id).unwrap();
        clock.set(120_000);
        let new = usecase.start_session("New").unwrap();

        let overview = usecase.overview().unwrap();
        assert_eq!(overview.len(), 2);
        assert_eq!(overview[0].session.id, new.id);
        assert!(overview[0].is_active);
        assert_eq!(overview[1].session.id, old.id);
        assert!(!overview[1].is_active);
        assert_eq!(overview[1].stats.duration_minutes, 1.0);
    }

    #[test]
    fn test_get_session() {
        let (usecase, _) = usecase(ActiveSessionPolicy::Reject);
        let talk = usecase.start_session("Talk").unwrap();

        assert_eq!(usecase.get_session(&talk.id).unwrap(), talk);
        let err = usecase.get_session("missing").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Entity not found: Session 'missing'");
    }

    #[test]
    fn test_delete_all() {
        let (usecase, _) = usecase(ActiveSessionPolicy::Reject);
        usecase.start_session("A").unwrap();
        usecase.delete_all_sessions().unwrap();
        assert!(usecase.list_sessions().unwrap().is_empty());
        assert!(usecase.active_session().unwrap().is_none());
    }
}
