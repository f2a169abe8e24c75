//! Account password type.
//!
//! The portal is a local demo: passwords are stored and compared in plain
//! text. This is not suitable for any deployment that claims to protect real
//! credentials. The wrapper exists so that passwords never leak through
//! `Debug` output or logs.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when validating a new [`Password`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    /// The password is shorter than the minimum length.
    #[error("password must be at least {min} characters")]
    TooShort {
        /// Minimum allowed length.
        min: usize,
    },
    /// The password lacks a required character class.
    #[error("password must include an uppercase letter, a lowercase letter, a number and a symbol")]
    MissingCharacterClass,
}

/// An account password (plain text, redacted in `Debug`).
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    /// Minimum length for newly registered passwords.
    pub const MIN_LENGTH: usize = 8;

    /// Validate a password chosen at registration.
    ///
    /// # Errors
    ///
    /// Returns an error if the password is shorter than 8 characters or does
    /// not contain at least one lowercase letter, uppercase letter, digit and
    /// non-alphanumeric character.
    pub fn parse(s: &str) -> Result<Self, PasswordError> {
        if s.chars().count() < Self::MIN_LENGTH {
            return Err(PasswordError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }

        let has_lower = s.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = s.chars().any(|c| c.is_ascii_uppercase());
        let has_digit = s.chars().any(|c| c.is_ascii_digit());
        let has_symbol = s.chars().any(|c| !c.is_ascii_alphanumeric());
        if !(has_lower && has_upper && has_digit && has_symbol) {
            return Err(PasswordError::MissingCharacterClass);
        }

        Ok(Self(s.to_owned()))
    }

    /// Wrap a stored or seeded password without validation.
    #[must_use]
    pub fn from_stored(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Exact comparison against a login attempt.
    #[must_use]
    pub fn verify(&self, attempt: &str) -> bool {
        self.0 == attempt
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}
