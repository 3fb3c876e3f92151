//! Blob codec
//!
//! The whole key ring is persisted as one JSON array under a single key.
//! `id` is required; missing flags decode as `false`, missing text as an
//! empty string, and unknown fields are ignored.

use crate::error::{KeyringError, KeyringResult};
use crate::vault::record::KeyringRecord;
use crate::vault::ring::{KeyRing, MAX_RECORDS};

/// Encodes the full record list
pub fn encode(ring: &KeyRing) -> KeyringResult<String> {
    serde_json::to_string(ring.records())
        .map_err(|e| KeyringError::serialization(format!("Failed to encode key ring: {}", e)))
}

/// Decodes a persisted blob, keeping at most `MAX_RECORDS` entries
pub fn decode(blob: &str) -> KeyringResult<KeyRing> {
    let records: Vec<KeyringRecord> = serde_json::from_str(blob)
        .map_err(|e| KeyringError::serialization(format!("Invalid key ring blob: {}", e)))?;

    if records.len() > MAX_RECORDS {
        tracing::warn!(
            stored = records.len(),
            kept = MAX_RECORDS,
            "Persisted key ring exceeds capacity, truncating"
        );
    }

    Ok(KeyRing::from_records(records))
}
