// KeyRing - local account/password key ring
// Core library

pub mod commands;
pub mod config;
pub mod error;
pub mod generator;
pub mod observability;
pub mod storage;
pub mod vault;

use std::sync::Arc;
use tokio::sync::Mutex;

use config::AppConfig;
use error::KeyringResult;
use storage::KeyValueStore;
use vault::RecordStore;

pub type SharedState = Arc<Mutex<AppState>>;

pub struct AppState {
    pub config: AppConfig,
    backend: Option<Box<dyn KeyValueStore>>,
    records: Option<RecordStore>,
}

impl AppState {
    /// State whose record store opens the configured backend on first use
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            backend: None,
            records: None,
        }
    }

    /// State that will use the given backend instead of the configured one
    pub fn with_backend(config: AppConfig, backend: Box<dyn KeyValueStore>) -> Self {
        Self {
            config,
            backend: Some(backend),
            records: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.records.is_some()
    }

    /// The record store, loaded from storage on first access
    pub fn record_store(&mut self) -> KeyringResult<&mut RecordStore> {
        if self.records.is_none() {
            let backend = match self.backend.take() {
                Some(backend) => backend,
                None => storage::open_backend(&self.config),
            };
            tracing::info!(backend = backend.backend_id(), "Opening key ring");
            self.records = Some(RecordStore::open(backend));
        }

        self.records
            .as_mut()
            .ok_or_else(|| error::KeyringError::internal("Record store unavailable"))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::load())
    }
}

/// Initializes logging and returns the shared state for a host shell
pub fn run() -> SharedState {
    observability::init_tracing();
    let config = AppConfig::load();
    tracing::info!(storage = ?config.storage, "Key ring starting");
    Arc::new(Mutex::new(AppState::new(config)))
}
