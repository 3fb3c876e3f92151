//! In-memory key-value store
//!
//! Clones share the same map, so a second store built from a clone
//! sees everything the first one wrote.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{KeyringError, KeyringResult};
use crate::storage::traits::KeyValueStore;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> KeyringError {
    KeyringError::storage("Memory store lock poisoned")
}

impl KeyValueStore for MemoryStore {
    fn backend_id(&self) -> &'static str {
        "memory"
    }

    fn get(&self, key: &str) -> KeyringResult<Option<String>> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> KeyringResult<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> KeyringResult<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.remove(key);
        Ok(())
    }
}
