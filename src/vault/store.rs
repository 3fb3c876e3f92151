//! Record Store
//!
//! Owns the key ring and keeps it durable. Each mutation is applied to a
//! copy of the ring, the whole list is written under `RECORDS_KEY`, and the
//! in-memory ring only advances once the write succeeded.

use tracing::instrument;

use crate::error::KeyringResult;
use crate::storage::KeyValueStore;
use crate::vault::codec;
use crate::vault::record::{KeyringRecord, RecordField};
use crate::vault::ring::{AddOutcome, KeyRing};

/// Storage key holding the serialized record list
pub const RECORDS_KEY: &str = "rectangles";

pub struct RecordStore {
    backend: Box<dyn KeyValueStore>,
    ring: KeyRing,
}

impl RecordStore {
    /// Opens the store, loading whatever the backend holds
    pub fn open(backend: Box<dyn KeyValueStore>) -> Self {
        let ring = load(backend.as_ref());
        Self { backend, ring }
    }

    /// Current snapshot, insertion order
    pub fn records(&self) -> &[KeyringRecord] {
        self.ring.records()
    }

    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Re-reads the persisted blob, discarding in-memory state
    pub fn reload(&mut self) {
        self.ring = load(self.backend.as_ref());
    }

    #[instrument(skip(self), fields(backend = self.backend.backend_id(), count = self.ring.len()))]
    pub fn add(&mut self) -> KeyringResult<AddOutcome> {
        if self.ring.is_full() {
            tracing::info!("Key ring at capacity, add ignored");
            return Ok(AddOutcome::AtCapacity);
        }
        let mut next = self.ring.clone();
        let outcome = next.add();
        match outcome {
            AddOutcome::Added { .. } => self.commit(next)?,
            _ => tracing::warn!(?outcome, "Key ring add ignored"),
        }
        Ok(outcome)
    }

    #[instrument(skip(self), fields(backend = self.backend.backend_id()))]
    pub fn remove(&mut self, index: usize) -> KeyringResult<KeyringRecord> {
        let mut next = self.ring.clone();
        let removed = next.remove(index)?;
        self.commit(next)?;
        Ok(removed)
    }

    #[instrument(skip(self), fields(backend = self.backend.backend_id()))]
    pub fn toggle_open(&mut self, index: usize) -> KeyringResult<()> {
        self.apply(|ring| ring.toggle_open(index))
    }

    /// Replaces a text field. Called per keystroke, so it stays at debug.
    #[instrument(level = "debug", skip(self, value), fields(backend = self.backend.backend_id()))]
    pub fn set_field(
        &mut self,
        index: usize,
        field: RecordField,
        value: impl Into<String>,
    ) -> KeyringResult<()> {
        let value = value.into();
        self.apply(|ring| ring.set_field(index, field, value))
    }

    #[instrument(skip(self), fields(backend = self.backend.backend_id()))]
    pub fn save(&mut self, index: usize) -> KeyringResult<()> {
        self.apply(|ring| ring.save(index))
    }

    #[instrument(skip(self), fields(backend = self.backend.backend_id()))]
    pub fn toggle_important(&mut self, index: usize) -> KeyringResult<()> {
        self.apply(|ring| ring.toggle_important(index))
    }

    fn apply<F>(&mut self, mutate: F) -> KeyringResult<()>
    where
        F: FnOnce(&mut KeyRing) -> KeyringResult<()>,
    {
        let mut next = self.ring.clone();
        mutate(&mut next)?;
        self.commit(next)
    }

    fn commit(&mut self, next: KeyRing) -> KeyringResult<()> {
        let blob = codec::encode(&next)?;
        self.backend.put(RECORDS_KEY, &blob)?;
        self.ring = next;
        Ok(())
    }
}

/// Absent key, unreadable backend and malformed blob all load as empty
fn load(backend: &dyn KeyValueStore) -> KeyRing {
    let blob = match backend.get(RECORDS_KEY) {
        Ok(Some(blob)) => blob,
        Ok(None) => return KeyRing::new(),
        Err(e) => {
            tracing::warn!(backend = backend.backend_id(), error = %e, "Failed to read key ring");
            return KeyRing::new();
        }
    };

    match codec::decode(&blob) {
        Ok(ring) => {
            tracing::debug!(backend = backend.backend_id(), count = ring.len(), "Loaded key ring");
            ring
        }
        Err(e) => {
            tracing::warn!(backend = backend.backend_id(), error = %e, "Discarding unreadable key ring");
            KeyRing::new()
        }
    }
}
