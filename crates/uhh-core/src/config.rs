use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which key-value store backs the session collection.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Store file; defaults to `<config_dir>/uhh/store.toml`
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}

/// What starting a session does while another one is still active.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActiveSessionPolicy {
    #[default]
    Reject,
    EndCurrent,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct SessionPolicyConfig {
    #[serde(default)]
    pub on_start_with_active: ActiveSessionPolicy,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct UhhConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub sessions: SessionPolicyConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config: UhhConfig = toml::from_str("").unwrap();
        assert_eq!(config, UhhConfig::default());
        assert_eq!(config.logging.filter, "info");
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(
            config.sessions.on_start_with_active,
            ActiveSessionPolicy::Reject
        );
    }

    #[test]
    fn test_full_document() {
        let config: UhhConfig = toml::from_str(
            r#"
            [storage]
            backend = "memory"
            path = "/tmp/uhh.toml"

            [logging]
            filter = "uhh=debug"
            json = true

            [sessions]
            on_start_with_active = "end_current"
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.path, Some(PathBuf::from("/tmp/uhh.toml")));
        assert_eq!(config.logging.filter, "uhh=debug");
        assert!(config.logging.json);
        assert_eq!(
            config.sessions.on_start_with_active,
            ActiveSessionPolicy::EndCurrent
        );
    }
}
