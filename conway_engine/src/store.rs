// store.rs - String key-value stores backing session persistence

use crate::error::StoreError;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Minimal string store in the spirit of browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Removing a key that is not there is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store with an optional size quota.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries : HashMap<String, String>,
    quota   : Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects writes once the stored keys and values would exceed `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self { entries: HashMap::new(), quota: Some(quota) }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    fn used_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if let Some(quota) = self.quota {
            if self.used_without(key) + key.len() + value.len() > quota {
                return Err(StoreError::QuotaExceeded { quota });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// The directory is created on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(key))
    }
}

fn io_error(key: &str) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io { key: key.to_string(), source }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(key)(err)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(io_error(key))?;
        fs::write(path, value).map_err(io_error(key))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(path) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(io_error(key)(err)),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_and_removes() {
        let mut store = MemoryStore::new();
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        store.remove("a").unwrap();
        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
    }

    #[test]
    fn memory_store_enforces_quota() {
        let mut store = MemoryStore::with_quota(8);
        store.set("k", "1234567").unwrap();
        // overwriting the same key only counts once
        store.set("k", "7654321").unwrap();
        assert!(matches!(store.set("j", "x"), Err(StoreError::QuotaExceeded { quota: 8 })));
    }

    #[test]
    fn file_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("state"));
        assert_eq!(store.get("gameOfLife").unwrap(), None);
        store.set("gameOfLife", "{}").unwrap();
        assert_eq!(store.get("gameOfLife").unwrap().as_deref(), Some("{}"));
        store.remove("gameOfLife").unwrap();
        store.remove("gameOfLife").unwrap();
        assert_eq!(store.get("gameOfLife").unwrap(), None);
    }

    #[test]
    fn file_store_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        for key in ["../escape", "a/b", "", "dot.json"] {
            assert!(matches!(store.set(key, "x"), Err(StoreError::InvalidKey(_))));
        }
    }
}
