//! Unified error handling.
//!
//! Each layer has its own error enum (`StorageError`, `RepositoryError`,
//! `AuthError`, `WorkflowError`); [`PortalError`] unifies them for the
//! [`crate::Portal`] facade. Every error maps onto one [`ErrorKind`], which is
//! what the presentation layer should branch on to pick a user-facing message.

use thiserror::Error;

use crate::config::ConfigError;
use crate::db::RepositoryError;
use crate::services::WorkflowError;
use crate::services::auth::AuthError;
use crate::store::StorageError;

/// Error taxonomy shared by every layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Lookup miss.
    NotFound,
    /// Email already registered.
    Duplicate,
    /// Wrong password.
    BadCredential,
    /// Account blocked.
    Blocked,
    /// Shelter not yet approved.
    PendingApproval,
    /// No session.
    Unauthenticated,
    /// Role or ownership violation.
    Forbidden,
    /// Missing or invalid field.
    Validation,
    /// Workflow state violation.
    InvalidTransition,
    /// Persistent medium unreadable or unwritable.
    StorageUnavailable,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::NotFound => "not_found",
            Self::Duplicate => "duplicate",
            Self::BadCredential => "bad_credential",
            Self::Blocked => "blocked",
            Self::PendingApproval => "pending_approval",
            Self::Unauthenticated => "unauthenticated",
            Self::Forbidden => "forbidden",
            Self::Validation => "validation",
            Self::InvalidTransition => "invalid_transition",
            Self::StorageUnavailable => "storage_unavailable",
        };
        f.write_str(name)
    }
}

/// Application-level error type for the portal facade.
#[derive(Debug, Error)]
pub enum PortalError {
    /// Storage medium failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Repository operation failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Identity or session operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Workflow transition failed.
    #[error("Workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A snapshot could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PortalError {
    /// Taxonomy entry for this error.
    ///
    /// Configuration and encoding failures have no taxonomy entry of their
    /// own and are reported as `Validation`.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Storage(_) => ErrorKind::StorageUnavailable,
            Self::Repository(e) => e.kind(),
            Self::Auth(e) => e.kind(),
            Self::Workflow(e) => e.kind(),
            Self::Config(_) | Self::Serialization(_) => ErrorKind::Validation,
        }
    }
}

/// Result alias for facade operations.
pub type Result<T, E = PortalError> = std::result::Result<T, E>;
