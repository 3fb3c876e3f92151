//! Key ring commands
//!
//! Commands for creating, editing and deleting key ring records.

use serde::Serialize;
use tracing::instrument;

use crate::error::KeyringResult;
use crate::vault::{AddOutcome, KeyringRecord, RecordField, RecordStore, MAX_RECORDS};
use crate::SharedState;

const SAVED_MESSAGE: &str = "Data saved!";

/// Response for every key ring command
#[derive(Debug, Serialize)]
pub struct KeyringResponse {
    pub success: bool,
    /// Snapshot after the command, insertion order
    pub records: Option<Vec<KeyringRecord>>,
    /// Transient notice for the user (e.g., save confirmation)
    pub message: Option<String>,
    pub error: Option<String>,
}

impl KeyringResponse {
    fn ok(store: &RecordStore, message: Option<String>) -> Self {
        Self {
            success: true,
            records: Some(store.records().to_vec()),
            message,
            error: None,
        }
    }

    fn failed(error: impl ToString) -> Self {
        Self {
            success: false,
            records: None,
            message: None,
            error: Some(error.to_string()),
        }
    }
}

/// Runs `op` against the lazily opened store and snapshots the result
async fn with_store<F>(state: &SharedState, op: F) -> KeyringResponse
where
    F: FnOnce(&mut RecordStore) -> KeyringResult<Option<String>>,
{
    let mut state = state.lock().await;

    let store = match state.record_store() {
        Ok(store) => store,
        Err(e) => return KeyringResponse::failed(e),
    };

    match op(&mut *store) {
        Ok(message) => KeyringResponse::ok(store, message),
        Err(e) => {
            tracing::warn!(error = %e, "Key ring command failed");
            KeyringResponse::failed(e)
        }
    }
}

/// Lists all records
#[instrument(skip(state))]
pub async fn list_records(state: &SharedState) -> KeyringResponse {
    with_store(state, |_| Ok(None)).await
}

/// Appends a blank record; at capacity the list is returned unchanged
#[instrument(skip(state))]
pub async fn add_record(state: &SharedState) -> KeyringResponse {
    with_store(state, |store| match store.add()? {
        AddOutcome::Added { .. } => Ok(None),
        AddOutcome::AtCapacity => Ok(Some(format!(
            "Key ring is full ({} records)",
            MAX_RECORDS
        ))),
        AddOutcome::IdsExhausted => Ok(Some("No record ids left".to_string())),
    })
    .await
}

/// Deletes the record at `index`
#[instrument(skip(state))]
pub async fn remove_record(state: &SharedState, index: usize) -> KeyringResponse {
    with_store(state, |store| store.remove(index).map(|_| None)).await
}

/// Expands or collapses the record at `index`
#[instrument(skip(state))]
pub async fn toggle_record_open(state: &SharedState, index: usize) -> KeyringResponse {
    with_store(state, |store| store.toggle_open(index).map(|_| None)).await
}

/// Replaces `field` ("accountNumber" or "password") of the record at `index`
#[instrument(level = "debug", skip(state, value))]
pub async fn set_record_field(
    state: &SharedState,
    index: usize,
    field: &str,
    value: String,
) -> KeyringResponse {
    let field: RecordField = match field.parse() {
        Ok(field) => field,
        Err(e) => return KeyringResponse::failed(e),
    };

    with_store(state, |store| store.set_field(index, field, value).map(|_| None)).await
}

/// Collapses and locks the record at `index`
#[instrument(skip(state))]
pub async fn save_record(state: &SharedState, index: usize) -> KeyringResponse {
    with_store(state, |store| {
        store.save(index)?;
        Ok(Some(SAVED_MESSAGE.to_string()))
    })
    .await
}

/// Stars or unstars the record at `index`
#[instrument(skip(state))]
pub async fn toggle_record_important(state: &SharedState, index: usize) -> KeyringResponse {
    with_store(state, |store| store.toggle_important(index).map(|_| None)).await
}
