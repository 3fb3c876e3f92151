//! Password generator commands

use serde::Serialize;
use tracing::instrument;

use crate::generator::{self, PasswordLength};

#[derive(Debug, Serialize)]
pub struct GeneratePasswordResponse {
    pub success: bool,
    pub password: Option<String>,
    pub error: Option<String>,
}

/// Generates a password from the raw length the user typed
///
/// Input that is not a whole number in 1..=20 never reaches the generator.
#[instrument]
pub fn generate_password(input: &str) -> GeneratePasswordResponse {
    match PasswordLength::parse(input) {
        Ok(length) => GeneratePasswordResponse {
            success: true,
            password: Some(generator::generate(length)),
            error: None,
        },
        Err(e) => GeneratePasswordResponse {
            success: false,
            password: None,
            error: Some(e.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{CHARSET, LENGTH_HINT};

    #[test]
    fn valid_input_yields_password_of_that_length() {
        let response = generate_password("8");

        assert!(response.success);
        let password = response.password.unwrap();
        assert_eq!(password.len(), 8);
        assert!(password.bytes().all(|b| CHARSET.contains(&b)));
    }

    #[test]
    fn invalid_input_yields_hint() {
        for input in ["", "0", "21", "twelve"] {
            let response = generate_password(input);

            assert!(!response.success);
            assert!(response.password.is_none());
            assert_eq!(response.error.as_deref(), Some(LENGTH_HINT));
        }
    }
}
