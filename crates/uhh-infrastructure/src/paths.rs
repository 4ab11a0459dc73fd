//! Unified path management for uhh files.
//!
//! ```text
//! ~/.config/uhh/           # Config directory (platform equivalent elsewhere)
//! ├── config.toml          # Application configuration
//! └── store.toml           # Key-value store (file backend)
//! ```

use std::path::PathBuf;
use uhh_core::error::{Result, UhhError};

const APP_DIR: &str = "uhh";

pub struct UhhPaths;

impl UhhPaths {
    /// Returns the uhh configuration directory (e.g. `~/.config/uhh/`).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| UhhError::config("Cannot find config directory"))
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Default location of the file-backed key-value store.
    pub fn store_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("store.toml"))
    }
}
