//! Launch and teardown rules.
//!
//! A session left running when the app went away is ended on the next cold
//! start, at the moment the app was last hidden.

use std::sync::Arc;
use uhh_core::clock::{Clock, ClockHandle};
use uhh_core::error::Result;
use uhh_core::lifecycle::LaunchContext;
use uhh_core::session::{SessionRepository, find_active_session};
use uhh_infrastructure::storage::SessionStore;

pub struct LifecyclePolicy {
    session_repository: Arc<dyn SessionRepository>,
    store: SessionStore,
    clock: ClockHandle,
}

impl LifecyclePolicy {
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        store: SessionStore,
        clock: ClockHandle,
    ) -> Self {
        Self {
            session_repository,
            store,
            clock,
        }
    }

    /// Runs the first-launch rule.
    ///
    /// Only the call that claims `ctx` does anything: if a session is still
    /// active it is ended at the stored `closedAt` (or now, when there is none).
    /// Returns the id of the session that was ended.
    ///
    /// `ctx` is claimed only once the sessions loaded, so a launch that failed
    /// on unreadable data runs again on the next call.
    pub fn on_launch(&self, ctx: &LaunchContext) -> Result<Option<String>> {
        if ctx.opened_at().is_some() {
            tracing::debug!("Launch already handled in this process");
            return Ok(None);
        }

        let sessions = self.session_repository.list_sessions()?;
        let now = self.clock.now_ms();
        if !ctx.claim_first_launch(now) {
            return Ok(None);
        }

        let Some(active) = find_active_session(&sessions) else {
            return Ok(None);
        };

        let closed_at = self.store.load_closed_at()?.unwrap_or(now);
        self.session_repository
            .end_session(&active.id, Some(closed_at))?;

        tracing::info!(
            "Ended session '{}' left active by the previous launch (closedAt={})",
            active.id,
            closed_at
        );
        Ok(Some(active.id.clone()))
    }

    /// Records the moment the app lost visibility.
    pub fn on_hidden(&self) -> Result<()> {
        let now = self.clock.now_ms();
        tracing::debug!("Recording closedAt={}", now);
        self.store.store_closed_at(now)
    }
}
