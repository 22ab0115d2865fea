//! Local key-value storage for accounts, session and score history.
//!
//! Blobs are opaque JSON strings keyed by a short name. The file-backed store
//! keeps one file per key; the in-memory store backs tests.

pub mod file;
pub mod memory;

pub use file::{get_data_dir, FileStore};
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid store key '{0}': only letters, digits, '_' and '-' are allowed")]
    InvalidKey(String),

    #[error("failed to read '{key}': {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("stored value for '{key}' is not valid JSON: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode value for '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Minimal blob store: `get`, `set` and `remove` by key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, blob: &str) -> Result<(), StoreError>;

    /// Returns true if a value was present.
    fn remove(&mut self, key: &str) -> Result<bool, StoreError>;
}

/// Read and decode a JSON value, or `None` if the key is absent.
pub fn load_json<T, S>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get(key)? {
        Some(blob) => serde_json::from_str(&blob)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                key: key.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

/// Encode a value as pretty JSON and store it.
pub fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let blob = serde_json::to_string_pretty(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &blob)
}

pub(crate) fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("fce_scores").is_ok());
        assert!(validate_key("session-1").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc").is_err());
        assert!(validate_key("a b").is_err());
    }

    #[test]
    fn test_json_helpers_roundtrip() {
        let mut store = MemoryStore::new();
        let mut value = HashMap::new();
        value.insert("alice".to_string(), 3u32);

        save_json(&mut store, "counts", &value).unwrap();
        let loaded: Option<HashMap<String, u32>> = load_json(&store, "counts").unwrap();
        assert_eq!(loaded, Some(value));
    }

    #[test]
    fn test_load_json_missing_is_none() {
        let store = MemoryStore::new();
        let loaded: Option<Vec<u32>> = load_json(&store, "missing").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_json_corrupt_is_error() {
        let mut store = MemoryStore::new();
        store.set("broken", "{not json").unwrap();
        let result: Result<Option<Vec<u32>>, _> = load_json(&store, "broken");
        assert!(matches!(result, Err(StoreError::Corrupt { .. })));
    }
}
