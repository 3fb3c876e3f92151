//! Key ring records
//!
//! One account/password entry as shown in the key ring list.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{KeyringError, KeyringResult};

/// A single stored account/password pair
///
/// Field names follow the persisted blob layout (camelCase).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyringRecord {
    /// Identifier, unique among live records
    pub id: u32,
    /// Detail view expanded
    #[serde(default)]
    pub is_open: bool,
    #[serde(default)]
    pub account_number: String,
    /// Stored in plain text
    #[serde(default)]
    pub password: String,
    /// Set once the user commits the entry; cosmetic only
    #[serde(default)]
    pub is_locked: bool,
    /// Starred
    #[serde(default)]
    pub is_important: bool,
}

impl KeyringRecord {
    /// Creates a blank record with the given id
    pub fn blank(id: u32) -> Self {
        Self {
            id,
            is_open: false,
            account_number: String::new(),
            password: String::new(),
            is_locked: false,
            is_important: false,
        }
    }

    pub fn set_field(&mut self, field: RecordField, value: String) {
        match field {
            RecordField::AccountNumber => self.account_number = value,
            RecordField::Password => self.password = value,
        }
    }
}

// Keeps passwords out of logs and panic messages.
impl fmt::Debug for KeyringRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyringRecord")
            .field("id", &self.id)
            .field("is_open", &self.is_open)
            .field("account_number", &self.account_number)
            .field("password", &"<redacted>")
            .field("is_locked", &self.is_locked)
            .field("is_important", &self.is_important)
            .finish()
    }
}

/// User-editable text fields of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordField {
    AccountNumber,
    Password,
}

impl RecordField {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordField::AccountNumber => "accountNumber",
            RecordField::Password => "password",
        }
    }
}

impl FromStr for RecordField {
    type Err = KeyringError;

    fn from_str(s: &str) -> KeyringResult<Self> {
        match s {
            "accountNumber" => Ok(RecordField::AccountNumber),
            "password" => Ok(RecordField::Password),
            other => Err(KeyringError::unknown_field(other)),
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
