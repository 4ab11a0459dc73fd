//! Session repository trait.
//!
//! Defines the interface for session persistence operations.

use super::model::Session;
use crate::error::Result;

/// An abstract repository over the whole session collection.
///
/// Every method is one complete load → modify → store cycle against the
/// backing store; there is no partial, row-level persistence and no locking
/// across calls. Two interleaved callers can therefore lose each other's
/// writes.
///
/// Operations addressed by id are silent no-ops when the id is unknown, so a
/// stale reference (for example a delete issued twice) never fails.
///
/// The repository does not enforce the single-active-session rule. Callers
/// must end the current active session before creating a new one.
pub trait SessionRepository: Send + Sync {
    /// Lists all sessions in stored order.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Session>)`: All stored sessions (empty if nothing is stored)
    /// - `Err(_)`: Stored data could not be decoded
    fn list_sessions(&self) -> Result<Vec<Session>>;

    /// Creates and stores a new active session.
    ///
    /// # Arguments
    ///
    /// * `name` - Display name; trimmed, must not be empty
    ///
    /// # Errors
    ///
    /// Returns `UhhError::InvalidArgument` if `name` is blank.
    fn create_session(&self, name: &str) -> Result<Session>;

    /// Appends an "uhh" event stamped now to the session with `session_id`.
    fn append_filler_word_event(&self, session_id: &str) -> Result<()>;

    /// Ends the session with `session_id` at `at`, or now when `at` is `None`.
    fn end_session(&self, session_id: &str, at: Option<i64>) -> Result<()>;

    /// Removes the session with `session_id`.
    fn delete_session(&self, session_id: &str) -> Result<()>;

    /// Clears the whole collection.
    fn delete_all_sessions(&self) -> Result<()>;
}
