//! Workflow error types.

use thiserror::Error;

use pet_portal_core::{ApplicationId, ApplicationStatus, PetId};

use super::auth::AuthError;
use crate::db::RepositoryError;
use crate::error::ErrorKind;
use crate::models::ValidationError;

/// Errors raised by the moderation, catalog and adoption workflows.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The entity the transition targets does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity name.
        entity: &'static str,
        /// Requested ID.
        id: String,
    },

    /// The caller does not own the entity.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The application already left `pending`.
    #[error("application {id} is already {status}")]
    AlreadyDecided {
        /// Application ID.
        id: ApplicationId,
        /// Terminal status it holds.
        status: ApplicationStatus,
    },

    /// The pet no longer accepts applications.
    #[error("pet {0} is not available for adoption")]
    PetUnavailable(PetId),

    /// Caller is not authenticated or lacks the role.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Input failed validation.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl WorkflowError {
    pub(crate) fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Taxonomy entry for this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::AlreadyDecided { .. } | Self::PetUnavailable(_) => ErrorKind::InvalidTransition,
            Self::Auth(e) => e.kind(),
            Self::Validation(_) => ErrorKind::Validation,
            Self::Repository(e) => e.kind(),
        }
    }
}
