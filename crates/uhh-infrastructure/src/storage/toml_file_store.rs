//! TOML-file-backed key-value store.

use super::atomic_toml::AtomicTomlFile;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use uhh_core::error::Result;
use uhh_core::storage::KeyValueStore;

type Table = BTreeMap<String, String>;

/// Keeps the whole key space as one flat TOML table of strings.
///
/// ```text
/// closedAt = "1718000000000"
/// filler-word-sessions = '[{"id":"…","name":"Talk",…}]'
/// version = "1"
/// ```
///
/// Each `set`/`remove` is a locked, atomic whole-file replace.
pub struct TomlFileStore {
    file: AtomicTomlFile<Table>,
}

impl TomlFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: AtomicTomlFile::new(path.into()),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl KeyValueStore for TomlFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let table = self.file.load()?;
        Ok(table.and_then(|mut t| t.remove(key)))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.file.update(Table::new(), |t| {
            t.insert(key.to_string(), value.to_string());
            Ok(())
        })?;
        tracing::debug!(key, path = ?self.file.path(), "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if !self.file.path().exists() {
            return Ok(());
        }
        self.file.update(Table::new(), |t| {
            t.remove(key);
            Ok(())
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_as_absent() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlFileStore::new(temp_dir.path().join("store.toml"));
        assert_eq!(store.get("version").unwrap(), None);
        store.remove("version").unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.toml");
        let blob = r#"[{"id":"a","name":"Talk \"one\"","startTime":0}]"#;

        {
            let store = TomlFileStore::new(&path);
            store.set("filler-word-sessions", blob).unwrap();
            store.set("version", "1").unwrap();
        }

        let reopened = TomlFileStore::new(&path);
        assert_eq!(
            reopened.get("filler-word-sessions").unwrap(),
            Some(blob.to_string())
        );
        assert_eq!(reopened.get("version").unwrap(), Some("1".to_string()));

        reopened.remove("version").unwrap();
        assert_eq!(reopened.get("version").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_malformed() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.toml");
        std::fs::write(&path, "version = [1, 2").unwrap();

        let store = TomlFileStore::new(&path);
        assert!(store.get("version").unwrap_err().is_malformed());
    }
}
