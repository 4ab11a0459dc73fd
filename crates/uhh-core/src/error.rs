//! Error types for the filler word counter.

use thiserror::Error;

/// A shared error type for every `uhh` crate.
///
/// Missing session ids are not reported through this type by the
/// repository: operations on an unknown id are silent no-ops. `NotFound`
/// exists for callers that need to turn a missing id into a hard failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UhhError {
    /// A caller-supplied argument was rejected (e.g. a blank session name)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// The backing key-value store cannot be reached
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Persisted data exists but could not be decoded
    #[error("Malformed data: {0}")]
    MalformedData(String),

    /// A new session was requested while another one is still running
    #[error("Session '{id}' is still active")]
    SessionAlreadyActive { id: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl UhhError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an InvalidArgument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a StorageUnavailable error
    pub fn storage_unavailable(message: impl Into<String>) -> Self {
        Self::StorageUnavailable(message.into())
    }

    /// Creates a MalformedData error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedData(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Migration error
    pub fn migration(message: impl Into<String>) -> Self {
        Self::Migration(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_storage_unavailable(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedData(_))
    }

    pub fn is_session_already_active(&self) -> bool {
        matches!(self, Self::SessionAlreadyActive { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for UhhError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for UhhError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for UhhError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for UhhError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Migration steps report through `anyhow` with context; the chain is
/// flattened into a single message here. A step that failed on malformed
/// stored data stays `MalformedData`.
impl From<anyhow::Error> for UhhError {
    fn from(err: anyhow::Error) -> Self {
        let message = format!("{:#}", err);
        match err.downcast_ref::<UhhError>() {
            Some(UhhError::MalformedData(_)) => Self::malformed(message),
            _ => Self::migration(message),
        }
    }
}

/// A type alias for `Result<T, UhhError>`.
pub type Result<T> = std::result::Result<T, UhhError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion_keeps_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: UhhError = io.into();
        match err {
            UhhError::Io { message } => assert!(message.contains("PermissionDenied")),
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_json_error_is_serialization() {
        let json_err = serde_json::from_str::<Vec<u8>>("{not json").unwrap_err();
        let err: UhhError = json_err.into();
        assert!(matches!(err, UhhError::Serialization { ref format, .. } if format == "JSON"));
    }

    #[test]
    fn test_anyhow_context_is_flattened() {
        let err = anyhow::anyhow!("root cause").context("step 1 failed");
        let err: UhhError = err.into();
        assert_eq!(
            err,
            UhhError::Migration("step 1 failed: root cause".to_string())
        );
    }

    #[test]
    fn test_anyhow_keeps_malformed_kind() {
        let err = anyhow::Error::from(UhhError::malformed("index overflow")).context("step 1 failed");
        let err: UhhError = err.into();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("step 1 failed"));
    }

    #[test]
    fn test_predicates() {
        assert!(UhhError::invalid_argument("x").is_invalid_argument());
        assert!(UhhError::not_found("Session", "abc").is_not_found());
        assert!(UhhError::storage_unavailable("gone").is_storage_unavailable());
        assert!(UhhError::malformed("bad").is_malformed());
        assert!(
            UhhError::SessionAlreadyActive {
                id: "s1".to_string()
            }
            .is_session_already_active()
        );
    }

    #[test]
    fn test_display() {
        let err = UhhError::not_found("Session", "abc");
        assert_eq!(err.to_string(), "Entity not found: Session 'abc'");
    }
}
