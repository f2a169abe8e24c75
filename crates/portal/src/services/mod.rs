//! Business logic services for the portal.
//!
//! # Services
//!
//! - `auth` - Account lookup, login, registration and the persisted session
//! - `moderation` - Administrator shelter approval and account blocking
//! - `catalog` - Shelter pet publication and adopter browsing
//! - `adoption` - Application submission and shelter decisions
//!
//! Every state-changing operation takes the caller's [`Session`] and checks
//! its role with [`authorize`] before touching storage.
//!
//! [`Session`]: crate::models::Session

pub mod adoption;
pub mod auth;
pub mod catalog;
mod error;
pub mod moderation;

pub use adoption::{AdoptionService, UserApplications};
pub use auth::{AuthError, IdentityService, authorize};
pub use catalog::CatalogService;
pub use error::WorkflowError;
pub use moderation::ModerationService;
