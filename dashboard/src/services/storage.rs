//! # Key-Value Storage
//!
//! Backends for [`KeyValueStore`]:
//!
//! - [`MemoryStore`]: process-lifetime map, used in tests and when no file is wanted
//! - [`FileStore`]: a single JSON object on disk, rewritten on every write

use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::StorageError;
use crate::core::service::KeyValueStore;

#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read_string(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn write_string(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON-file backed store.
///
/// The whole map is loaded on open and rewritten through a temporary file
/// plus rename on each write, so a crash never leaves a half-written file.
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open `path`. A missing file is an empty store; an unreadable or
    /// malformed one is logged and also treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries: BTreeMap<String, String> = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Storage file is corrupt, starting empty");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Storage file unreadable, starting empty");
                BTreeMap::new()
            }
        };

        tracing::debug!(path = %path.display(), keys = entries.len(), "Storage opened");
        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn read_string(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn write_string(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write();
        let previous = entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.persist(&entries) {
            match previous {
                Some(previous) => entries.insert(key.to_string(), previous),
                None => entries.remove(key),
            };
            tracing::error!(path = %self.path.display(), error = %e, "Storage write failed");
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("dashboard-storage-{}", uuid::Uuid::new_v4()))
            .join("store.json")
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert_eq!(store.read_string("k"), None);
        store.write_string("k", "v").unwrap();
        assert_eq!(store.read_string("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let path = scratch_path();
        let store = FileStore::open(&path);
        assert_eq!(store.read_string("hidden_collections_0x1"), None);
        store.write_string("hidden_collections_0x1", r#"["a"]"#).unwrap();

        let reopened = FileStore::open(&path);
        assert_eq!(
            reopened.read_string("hidden_collections_0x1").as_deref(),
            Some(r#"["a"]"#)
        );

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_store_corrupt_file_is_empty() {
        let path = scratch_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        let store = FileStore::open(&path);
        assert_eq!(store.read_string("anything"), None);
        store.write_string("k", "v").unwrap();
        assert_eq!(FileStore::open(&path).read_string("k").as_deref(), Some("v"));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
