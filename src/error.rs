//! Key ring errors
//!
//! Single error type shared by the record store, storage backends,
//! generator and configuration.

use thiserror::Error;

pub type KeyringResult<T> = Result<T, KeyringError>;

#[derive(Debug, Error)]
pub enum KeyringError {
    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Record index {index} is out of range (count {count})")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("{message}")]
    InvalidLength { message: String },

    #[error("Unknown record field: {name}")]
    UnknownField { name: String },

    #[error("Config error: {message}")]
    Config { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl KeyringError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    pub fn index_out_of_range(index: usize, count: usize) -> Self {
        Self::IndexOutOfRange { index, count }
    }

    pub fn invalid_length(message: impl Into<String>) -> Self {
        Self::InvalidLength {
            message: message.into(),
        }
    }

    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField { name: name.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for KeyringError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}
