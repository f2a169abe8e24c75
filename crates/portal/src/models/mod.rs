//! Domain models for the portal.
//!
//! These are the persisted entity schemas plus the input and report types the
//! services exchange with the presentation layer. Every persisted type
//! serializes with camelCase field names.

pub mod account;
pub mod application;
pub mod pet;
pub mod session;
pub mod shelter;
pub mod snapshot;
pub mod user;
pub mod validation;

pub use account::{Account, Administrator, Registration, RegistrationKind};
pub use application::{Applicant, Application, ApplicationCounts};
pub use pet::{MAX_IMAGES, PLACEHOLDER_IMAGE, Pet, PetDraft, PetFilter};
pub use session::Session;
pub use shelter::Shelter;
pub use snapshot::{PortalStats, Snapshot};
pub use user::User;
pub use validation::ValidationError;
