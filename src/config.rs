//! App configuration.
//!
//! Defaults are persisted to a per-user config file. Environment variables
//! override any stored values so a host shell can pin the storage backend.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{KeyringError, KeyringResult};

const DEFAULT_LAUNCH_DELAY_MS: u64 = 3000;

/// Subdirectories of the app home
const DATA_DIR: &str = "data";
const LOG_DIR: &str = "logs";
const CONFIG_FILE: &str = "config.json";

/// Where the key ring blob is kept
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Preferences file under the data directory
    #[default]
    File,
    /// OS credential store
    OsKeychain,
    /// Process memory only, lost on exit
    Memory,
}

impl FromStr for StorageBackend {
    type Err = KeyringError;

    fn from_str(s: &str) -> KeyringResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StorageBackend::File),
            "os_keychain" | "keychain" => Ok(StorageBackend::OsKeychain),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(KeyringError::config(format!("Unknown storage backend: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageBackend,
    /// Overrides the default data directory for the file backend
    #[serde(default)]
    pub data_dir: Option<String>,
    /// Delay before leaving the launch screen
    #[serde(default = "default_launch_delay_ms")]
    pub launch_delay_ms: u64,
}

fn default_launch_delay_ms() -> u64 {
    DEFAULT_LAUNCH_DELAY_MS
}

/// Per-user application directory
pub fn app_home() -> PathBuf {
    if cfg!(windows) {
        let appdata = std::env::var_os("APPDATA")
            .unwrap_or_else(|| std::env::var_os("USERPROFILE").unwrap_or_default());
        let mut path = PathBuf::from(appdata);
        path.push("KeyRing");
        path
    } else {
        let home = std::env::var_os("HOME").unwrap_or_default();
        let mut path = PathBuf::from(home);
        path.push(".keyring-app");
        path
    }
}

pub fn data_directory() -> PathBuf {
    app_home().join(DATA_DIR)
}

pub fn log_directory() -> PathBuf {
    app_home().join(LOG_DIR)
}

fn config_path() -> PathBuf {
    app_home().join(CONFIG_FILE)
}

impl AppConfig {
    fn defaults() -> Self {
        Self {
            storage: StorageBackend::default(),
            data_dir: None,
            launch_delay_ms: DEFAULT_LAUNCH_DELAY_MS,
        }
    }

    /// Applies overrides from `lookup`; unparsable values are ignored
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("KEYRING_APP_STORAGE") {
            match value.parse() {
                Ok(backend) => self.storage = backend,
                Err(e) => tracing::warn!(error = %e, "Ignoring KEYRING_APP_STORAGE"),
            }
        }
        if let Some(value) = lookup("KEYRING_APP_DATA_DIR") {
            if !value.trim().is_empty() {
                self.data_dir = Some(value);
            }
        }
        if let Some(value) = lookup("KEYRING_APP_LAUNCH_DELAY_MS") {
            match value.trim().parse() {
                Ok(ms) => self.launch_delay_ms = ms,
                Err(_) => tracing::warn!(value = %value, "Ignoring KEYRING_APP_LAUNCH_DELAY_MS"),
            }
        }
    }

    /// Loads the per-user config with env overrides applied
    pub fn load() -> Self {
        let mut config = Self::load_from(&config_path());
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Reads a config file; missing or unreadable files yield defaults
    pub fn load_from(path: &Path) -> Self {
        let parsed = fs::read_to_string(path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok());

        parsed.unwrap_or_else(|| {
            tracing::debug!(path = %path.display(), "Using default config");
            Self::defaults()
        })
    }

    /// Config for an ephemeral, in-memory session with no launch delay
    pub fn in_memory() -> Self {
        Self {
            storage: StorageBackend::Memory,
            data_dir: None,
            launch_delay_ms: 0,
        }
    }

    /// Writes the config as pretty JSON, creating parent directories
    pub fn save_to(&self, path: &Path) -> KeyringResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                KeyringError::config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let payload = serde_json::to_string_pretty(self)
            .map_err(|e| KeyringError::config(format!("Save failed: {}", e)))?;
        fs::write(path, payload).map_err(|e| KeyringError::config(format!("Save failed: {}", e)))?;
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_use_file_backend_and_three_second_delay() {
        let config = AppConfig::defaults();
        assert_eq!(config.storage, StorageBackend::File);
        assert_eq!(config.launch_delay_ms, 3000);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn env_overrides_replace_stored_values() {
        let mut config = AppConfig::defaults();
        config.apply_overrides(lookup_from(&[
            ("KEYRING_APP_STORAGE", "OS_KEYCHAIN"),
            ("KEYRING_APP_DATA_DIR", "/tmp/keys"),
            ("KEYRING_APP_LAUNCH_DELAY_MS", "250"),
        ]));

        assert_eq!(config.storage, StorageBackend::OsKeychain);
        assert_eq!(config.data_dir.as_deref(), Some("/tmp/keys"));
        assert_eq!(config.launch_delay_ms, 250);
    }

    #[test]
    fn invalid_overrides_are_ignored() {
        let mut config = AppConfig::defaults();
        config.apply_overrides(lookup_from(&[
            ("KEYRING_APP_STORAGE", "cloud"),
            ("KEYRING_APP_DATA_DIR", "  "),
            ("KEYRING_APP_LAUNCH_DELAY_MS", "soon"),
        ]));

        assert_eq!(config, AppConfig::defaults());
    }

    #[test]
    fn partial_config_file_fills_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"storage":"memory"}"#).unwrap();

        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.launch_delay_ms, 3000);
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = std::env::temp_dir().join(format!("keyring-app-config-{}", rand::random::<u64>()));
        let path = dir.join(CONFIG_FILE);
        let config = AppConfig {
            storage: StorageBackend::OsKeychain,
            data_dir: Some("/var/keys".to_string()),
            launch_delay_ms: 1200,
        };

        config.save_to(&path).unwrap();

        assert_eq!(AppConfig::load_from(&path), config);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_or_corrupt_file_loads_defaults() {
        let dir = std::env::temp_dir().join(format!("keyring-app-config-{}", rand::random::<u64>()));
        let path = dir.join(CONFIG_FILE);

        assert_eq!(AppConfig::load_from(&path), AppConfig::defaults());

        fs::create_dir_all(&dir).unwrap();
        fs::write(&path, "{storage:").unwrap();
        assert_eq!(AppConfig::load_from(&path), AppConfig::defaults());

        let _ = fs::remove_dir_all(&dir);
    }
}
