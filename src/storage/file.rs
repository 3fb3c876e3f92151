//! File Store
//!
//! Preferences-style storage: one JSON object per namespace, mapping keys
//! to string values. Every write rewrites the whole file via a temp file
//! and rename.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{KeyringError, KeyringResult};
use crate::storage::traits::KeyValueStore;

pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store backed by `<dir>/<namespace>.json`
    pub fn new(dir: impl Into<PathBuf>, namespace: &str) -> Self {
        let mut path = dir.into();
        path.push(format!("{}.json", namespace));
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> KeyringResult<BTreeMap<String, String>> {
        let Some(raw) = self.read_raw()? else {
            return Ok(BTreeMap::new());
        };

        serde_json::from_str(&raw).map_err(|e| {
            KeyringError::storage(format!(
                "Invalid preferences file {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Map to rewrite on a write; an unparsable file is replaced, not kept
    fn read_map_for_write(&self) -> KeyringResult<BTreeMap<String, String>> {
        let Some(raw) = self.read_raw()? else {
            return Ok(BTreeMap::new());
        };

        match serde_json::from_str(&raw) {
            Ok(map) => Ok(map),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Discarding unreadable preferences file"
                );
                Ok(BTreeMap::new())
            }
        }
    }

    fn read_raw(&self) -> KeyringResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(KeyringError::storage(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> KeyringResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                KeyringError::storage(format!("Failed to create data directory: {}", e))
            })?;
        }

        let payload = serde_json::to_string(map)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, payload)
            .map_err(|e| KeyringError::storage(format!("Write failed: {}", e)))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| KeyringError::storage(format!("Write failed: {}", e)))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn backend_id(&self) -> &'static str {
        "file"
    }

    fn get(&self, key: &str) -> KeyringResult<Option<String>> {
        Ok(self.read_map()?.remove(key))
    }

    fn put(&self, key: &str, value: &str) -> KeyringResult<()> {
        let mut map = self.read_map_for_write()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> KeyringResult<()> {
        let mut map = self.read_map_for_write()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("keyring-app-test-{}", rand::random::<u64>()))
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = temp_dir();
        let store = FileStore::new(&dir, "keyring_prefs");

        assert_eq!(store.get("rectangles").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn values_survive_a_new_store_instance() {
        let dir = temp_dir();
        let store = FileStore::new(&dir, "keyring_prefs");
        store.put("rectangles", "[]").unwrap();
        store.put("other", "1").unwrap();

        let reopened = FileStore::new(&dir, "keyring_prefs");
        assert_eq!(reopened.get("rectangles").unwrap().as_deref(), Some("[]"));

        reopened.remove("other").unwrap();
        assert_eq!(store.get("other").unwrap(), None);
        assert_eq!(store.get("rectangles").unwrap().as_deref(), Some("[]"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = temp_dir();
        fs::create_dir_all(&dir).unwrap();
        let store = FileStore::new(&dir, "keyring_prefs");
        fs::write(store.path(), "{not json").unwrap();

        let err = store.get("rectangles").expect_err("corrupt file");
        assert!(matches!(err, KeyringError::Storage { .. }));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn write_replaces_corrupt_file() {
        let dir = temp_dir();
        fs::create_dir_all(&dir).unwrap();
        let store = FileStore::new(&dir, "keyring_prefs");
        fs::write(store.path(), "{truncated").unwrap();

        store.put("rectangles", "[]").unwrap();

        assert_eq!(store.get("rectangles").unwrap().as_deref(), Some("[]"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn record_store_recovers_from_corrupt_file() {
        use crate::vault::RecordStore;

        let dir = temp_dir();
        fs::create_dir_all(&dir).unwrap();
        let path = FileStore::new(&dir, "keyring_prefs").path().to_path_buf();
        fs::write(&path, "{truncated").unwrap();

        let mut records = RecordStore::open(Box::new(FileStore::new(&dir, "keyring_prefs")));
        assert!(records.is_empty());
        for _ in 0..3 {
            records.add().unwrap();
        }

        let reopened = RecordStore::open(Box::new(FileStore::new(&dir, "keyring_prefs")));
        assert_eq!(reopened.len(), 3);

        let _ = fs::remove_dir_all(&dir);
    }
}
