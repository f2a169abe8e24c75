//! Authentication error types.

use thiserror::Error;

use pet_portal_core::{EmailError, PasswordError, Role};

use crate::db::RepositoryError;
use crate::error::ErrorKind;
use crate::models::ValidationError;

/// Errors that can occur during identity and session operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No account uses this email.
    #[error("no account found for this email")]
    NotFound,

    /// The administrator blocked this account.
    #[error("account is blocked")]
    Blocked,

    /// Password mismatch.
    #[error("invalid credentials")]
    BadCredential,

    /// Shelter registered but not yet approved.
    #[error("shelter is pending approval")]
    PendingApproval,

    /// No session exists.
    #[error("not logged in")]
    Unauthenticated,

    /// Session role is not allowed.
    #[error("role {role} is not allowed here")]
    Forbidden {
        /// Role of the current session.
        role: Role,
    },

    /// Email already resolves to an account.
    #[error("email {0} is already registered")]
    Duplicate(String),

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password too weak.
    #[error("password validation failed: {0}")]
    WeakPassword(#[from] PasswordError),

    /// Missing registration field.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Repository/storage error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl AuthError {
    /// Taxonomy entry for this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound => ErrorKind::NotFound,
            Self::Blocked => ErrorKind::Blocked,
            Self::BadCredential => ErrorKind::BadCredential,
            Self::PendingApproval => ErrorKind::PendingApproval,
            Self::Unauthenticated => ErrorKind::Unauthenticated,
            Self::Forbidden { .. } => ErrorKind::Forbidden,
            Self::Duplicate(_) => ErrorKind::Duplicate,
            Self::InvalidEmail(_) | Self::WeakPassword(_) | Self::Validation(_) => {
                ErrorKind::Validation
            }
            Self::Repository(e) => e.kind(),
        }
    }
}
