//! Process-wide launch context.
//!
//! Replaces the "has the app been opened before" global with an explicit
//! object. It starts unset at cold start and is claimed once per launch.

use std::sync::OnceLock;

#[derive(Debug, Default)]
pub struct LaunchContext {
    opened_at: OnceLock<i64>,
}

impl LaunchContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the one-shot marker.
    ///
    /// Returns `true` only for the first call in the lifetime of this context.
    pub fn claim_first_launch(&self, now_ms: i64) -> bool {
        self.opened_at.set(now_ms).is_ok()
    }

    /// When the marker was claimed, if it was.
    pub fn opened_at(&self) -> Option<i64> {
        self.opened_at.get().copied()
    }
}
