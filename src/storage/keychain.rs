//! Keychain Store
//!
//! Key-value storage on top of the OS credential store. The namespace is
//! the keyring service name and each key is an account entry under it.

use keyring::Entry;

use crate::error::{KeyringError, KeyringResult};
use crate::storage::traits::KeyValueStore;

pub struct KeychainStore {
    service: String,
}

impl KeychainStore {
    pub fn new(namespace: &str) -> Self {
        Self {
            service: namespace.to_string(),
        }
    }

    fn entry(&self, key: &str) -> KeyringResult<Entry> {
        Entry::new(&self.service, key)
            .map_err(|e| KeyringError::storage(format!("Keyring error: {}", e)))
    }
}

impl KeyValueStore for KeychainStore {
    fn backend_id(&self) -> &'static str {
        "os_keychain"
    }

    fn get(&self, key: &str) -> KeyringResult<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(KeyringError::storage(format!("Failed to read {}: {}", key, e))),
        }
    }

    fn put(&self, key: &str, value: &str) -> KeyringResult<()> {
        self.entry(key)?
            .set_password(value)
            .map_err(|e| KeyringError::storage(format!("Failed to save {}: {}", key, e)))
    }

    fn remove(&self, key: &str) -> KeyringResult<()> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(KeyringError::storage(format!("Failed to delete {}: {}", key, e))),
        }
    }
}
