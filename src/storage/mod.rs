//! Storage Module
//!
//! Local key-value storage backing the key ring.

pub mod file;
pub mod keychain;
pub mod memory;
pub mod traits;

use std::path::PathBuf;

pub use file::FileStore;
pub use keychain::KeychainStore;
pub use memory::MemoryStore;
pub use traits::KeyValueStore;

use crate::config::{AppConfig, StorageBackend};

/// Namespace shared by every key the app persists
pub const PREFS_NAMESPACE: &str = "keyring_prefs";

/// Opens the backend selected in the config
pub fn open_backend(config: &AppConfig) -> Box<dyn KeyValueStore> {
    match config.storage {
        StorageBackend::File => {
            let dir = config
                .data_dir
                .as_ref()
                .map(PathBuf::from)
                .unwrap_or_else(crate::config::data_directory);
            Box::new(FileStore::new(dir, PREFS_NAMESPACE))
        }
        StorageBackend::OsKeychain => Box::new(KeychainStore::new(PREFS_NAMESPACE)),
        StorageBackend::Memory => Box::new(MemoryStore::new()),
    }
}
