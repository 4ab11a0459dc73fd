//! Configuration service implementation.
//!
//! Loads [`UhhConfig`] from `config.toml` (by default
//! `~/.config/uhh/config.toml`) and caches it.

use crate::paths::UhhPaths;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use uhh_core::config::UhhConfig;
use uhh_core::error::{Result, UhhError};

/// Configuration service that loads and caches the application configuration.
///
/// A missing or empty file yields the defaults. A file that cannot be parsed
/// is an error; the service never overwrites it.
#[derive(Debug, Clone)]
pub struct ConfigService {
    /// `None` means the platform default location.
    path: Option<PathBuf>,
    /// Cached configuration, loaded lazily on first access.
    config: Arc<RwLock<Option<UhhConfig>>>,
}

impl ConfigService {
    pub fn new() -> Self {
        Self {
            path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Reads the configuration from an explicit file instead of the default one.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<UhhConfig> {
        {
            let read_lock = self
                .config
                .read()
                .map_err(|e| UhhError::internal(format!("config cache poisoned: {}", e)))?;
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = self.load_config()?;

        let mut write_lock = self
            .config
            .write()
            .map_err(|e| UhhError::internal(format!("config cache poisoned: {}", e)))?;
        *write_lock = Some(loaded.clone());

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        match self.config.write() {
            Ok(mut write_lock) => *write_lock = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }

    fn config_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => UhhPaths::config_file(),
        }
    }

    fn load_config(&self) -> Result<UhhConfig> {
        let path = self.config_path()?;

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config file at {:?}, using defaults", path);
                return Ok(UhhConfig::default());
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(UhhConfig::default());
        }

        toml::from_str(&content)
            .map_err(|e| UhhError::config(format!("Failed to parse {:?}: {}", path, e)))
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
