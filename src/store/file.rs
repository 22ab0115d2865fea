use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::{validate_key, KeyValueStore, StoreError};

/// Get the default data directory (~/.config/fce-score/data)
pub fn get_data_dir() -> anyhow::Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join("data"))
}

/// Store that keeps each key in `<dir>/<key>.json`.
///
/// Writes go through atomic-write-file, so a crash mid-write leaves the
/// previous value in place. There is no locking between processes.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, blob: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let write_err = |source| StoreError::Write {
            key: key.to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(write_err)?;

        let mut file = AtomicWriteFile::open(&path).map_err(write_err)?;
        file.write_all(blob.as_bytes()).map_err(write_err)?;
        file.commit().map_err(write_err)?;

        tracing::debug!(key, path = %path.display(), bytes = blob.len(), "stored blob");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StoreError::Write {
                key: key.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_missing_returns_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get("fce_users").unwrap(), None);
    }

    #[test]
    fn test_set_creates_directory_and_roundtrips() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested").join("data");
        let mut store = FileStore::new(&nested);

        store.set("fce_scores", "{\"a\":1}").unwrap();

        assert!(nested.join("fce_scores.json").exists());
        assert_eq!(store.get("fce_scores").unwrap().as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn test_set_overwrites() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path());
        store.set("session", "\"alice\"").unwrap();
        store.set("session", "\"bob\"").unwrap();
        assert_eq!(store.get("session").unwrap().as_deref(), Some("\"bob\""));
    }

    #[test]
    fn test_remove() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path());
        store.set("session", "\"alice\"").unwrap();
        assert!(store.remove("session").unwrap());
        assert!(!store.remove("session").unwrap());
        assert_eq!(store.get("session").unwrap(), None);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path());
        assert!(matches!(
            store.set("../escape", "x"),
            Err(StoreError::InvalidKey(_))
        ));
    }
}
