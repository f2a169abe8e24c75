//! Integration tests for the Pet Adoption Portal.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pet-portal-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `identity` - Registration, login and session handling
//! - `catalog` - Pet browsing, filtering and publication
//! - `adoption` - Application workflow and the adoption cascade
//! - `moderation` - Administrator shelter and user moderation
//! - `storage` - Store round trips, persistence and corruption recovery
//!
//! Every test builds its own [`TestContext`] over an in-memory or temporary
//! file store, so tests are independent and run in parallel.

#![cfg_attr(not(test), forbid(unsafe_code))]

use pet_portal::Portal;
use pet_portal::models::{Applicant, Session};
use pet_portal::store::Store;

/// Seeded administrator credentials.
pub const ADMIN: (&str, &str) = ("admin@petportal.org", "Admin@123");
/// Seeded adopter credentials (`user-1`).
pub const ADOPTER: (&str, &str) = ("aarav@petportal-mail.com", "User@1234");
/// Seeded approved shelter credentials (`shelter-1`).
pub const GREEN_PAWS: (&str, &str) = ("greenpaws@shelter.org", "Shelter@123");
/// Seeded pending shelter credentials (`shelter-2`).
pub const SUNNY_TAILS: (&str, &str) = ("sunnytails@shelter.org", "Shelter@123");

/// A portal plus shortcuts for the seeded accounts.
pub struct TestContext {
    pub portal: Portal,
}

impl TestContext {
    /// A portal over a fresh in-memory store holding the demo dataset.
    ///
    /// # Panics
    ///
    /// Panics if seeding fails.
    #[must_use]
    pub fn new() -> Self {
        Self {
            portal: Portal::in_memory().expect("seed in-memory portal"),
        }
    }

    /// A portal over a fresh in-memory store with no data at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            portal: Portal::with_store(Store::in_memory()),
        }
    }

    /// Log in, panicking on failure.
    ///
    /// # Panics
    ///
    /// Panics if the credentials are rejected.
    #[must_use]
    pub fn login(&self, (email, password): (&str, &str)) -> Session {
        self.portal
            .authenticate(email, password)
            .unwrap_or_else(|e| panic!("login as {email} failed: {e}"))
    }

    /// Session of the platform administrator.
    #[must_use]
    pub fn admin(&self) -> Session {
        self.login(ADMIN)
    }

    /// Session of the seeded adopter.
    #[must_use]
    pub fn adopter(&self) -> Session {
        self.login(ADOPTER)
    }

    /// Session of the seeded approved shelter.
    #[must_use]
    pub fn green_paws(&self) -> Session {
        self.login(GREEN_PAWS)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A complete application form for the seeded adopter.
#[must_use]
pub fn applicant() -> Applicant {
    Applicant {
        full_name: "Aarav Singh".to_owned(),
        email: "aarav@petportal-mail.com".to_owned(),
        phone: "+1 (555) 110-2401".to_owned(),
        city: "Riverdale".to_owned(),
        address: "12 Elm Street".to_owned(),
        housing: "House with yard".to_owned(),
        experience: "Grew up with dogs".to_owned(),
        message: "Happy to visit this weekend.".to_owned(),
    }
}
