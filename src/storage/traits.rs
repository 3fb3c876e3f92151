//! KeyValueStore trait definition
//!
//! The seam between the record store and wherever its blob lives.
//! Backends store opaque string values under string keys.

use crate::error::KeyringResult;

/// Minimal string key-value storage
///
/// Writes are whole-value replacements; there is no partial update.
pub trait KeyValueStore: Send + Sync {
    /// Short backend name for logs (e.g., "file", "os_keychain", "memory")
    fn backend_id(&self) -> &'static str;

    /// Reads the value under `key`, `None` if it was never written
    fn get(&self, key: &str) -> KeyringResult<Option<String>>;

    /// Replaces the value under `key`
    fn put(&self, key: &str, value: &str) -> KeyringResult<()>;

    /// Deletes `key`; deleting an absent key succeeds
    fn remove(&self, key: &str) -> KeyringResult<()>;
}
