//! Subcommand implementations.
//!
//! Results are reported through `tracing` at `info`; only `export` writes to
//! stdout.

pub mod account;
pub mod applications;
pub mod data;
pub mod moderation;
pub mod pets;

use thiserror::Error;

use pet_portal::config::ConfigError;
use pet_portal::{ErrorKind, PortalError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Portal operation failed.
    #[error(transparent)]
    Portal(#[from] PortalError),

    /// Environment configuration is invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A looked-up entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl CliError {
    /// Taxonomy entry, when the failure came from the portal.
    #[must_use]
    pub const fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Portal(e) => Some(e.kind()),
            Self::NotFound(_) => Some(ErrorKind::NotFound),
            Self::Config(_) | Self::Io(_) => None,
        }
    }
}
