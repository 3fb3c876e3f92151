//! Random password generator
//!
//! Draws every character independently and uniformly from a fixed
//! 77-symbol pool. Lengths are validated into `PasswordLength` before
//! they ever reach the generator.

use std::fmt;

use rand::Rng;

use crate::error::{KeyringError, KeyringResult};

/// Uppercase, lowercase, digits, then 15 symbols
pub const CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+?";

pub const MIN_LENGTH: u8 = 1;
pub const MAX_LENGTH: u8 = 20;

/// Message shown to users when a length is rejected
pub const LENGTH_HINT: &str = "Please enter a number between 1 and 20";

/// A password length within `MIN_LENGTH..=MAX_LENGTH`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PasswordLength(u8);

impl PasswordLength {
    pub fn new(length: u32) -> KeyringResult<Self> {
        match u8::try_from(length) {
            Ok(n) if (MIN_LENGTH..=MAX_LENGTH).contains(&n) => Ok(Self(n)),
            _ => Err(KeyringError::invalid_length(LENGTH_HINT)),
        }
    }

    /// Parses raw user input such as `" 12"`
    pub fn parse(input: &str) -> KeyringResult<Self> {
        let length: u32 = input
            .trim()
            .parse()
            .map_err(|_| KeyringError::invalid_length(LENGTH_HINT))?;
        Self::new(length)
    }

    pub fn get(self) -> usize {
        usize::from(self.0)
    }
}

impl fmt::Display for PasswordLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generates a password using the thread-local OS-seeded RNG
pub fn generate(length: PasswordLength) -> String {
    generate_with(&mut rand::thread_rng(), length)
}

pub fn generate_with<R: Rng>(rng: &mut R, length: PasswordLength) -> String {
    (0..length.get())
        .map(|_| char::from(CHARSET[rng.gen_range(0..CHARSET.len())]))
        .collect()
}
