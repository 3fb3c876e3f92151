//! Vault Module
//!
//! The key ring: records, their persisted encoding, and the store that
//! keeps them in sync with local storage.

pub mod codec;
pub mod record;
pub mod ring;
pub mod store;

pub use record::{KeyringRecord, RecordField};
pub use ring::{AddOutcome, KeyRing, MAX_RECORDS};
pub use store::{RecordStore, RECORDS_KEY};
