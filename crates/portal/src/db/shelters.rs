//! Shelter repository.

use pet_portal_core::ShelterId;
use tracing::{debug, info};

use super::{Collection, Record, RepositoryError, email_in_use};
use crate::models::Shelter;
use crate::models::validation::required;
use crate::store::{Store, keys};

impl Record for Shelter {
    const KEY: &'static str = keys::SHELTERS;
    const NAME: &'static str = "shelter";

    type Id = ShelterId;

    fn id(&self) -> &ShelterId {
        &self.id
    }
}

/// Repository for shelter accounts.
pub struct ShelterRepository<'a> {
    store: &'a Store,
}

impl<'a> ShelterRepository<'a> {
    /// Create a new shelter repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    fn collection(&self) -> Collection<'a, Shelter> {
        Collection::new(self.store)
    }

    /// Every shelter, in registration order.
    #[must_use]
    pub fn list(&self) -> Vec<Shelter> {
        self.collection().load()
    }

    /// Get a shelter by ID.
    #[must_use]
    pub fn get_by_id(&self, id: &ShelterId) -> Option<Shelter> {
        self.collection().find(id)
    }

    /// Get a shelter by email (case-insensitive).
    #[must_use]
    pub fn get_by_email(&self, email: &str) -> Option<Shelter> {
        self.list()
            .into_iter()
            .find(|shelter| shelter.email.matches(email))
    }

    /// Create a new shelter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if the name is blank.
    /// Returns `RepositoryError::Conflict` if the email belongs to any account
    /// or the ID is taken.
    /// Returns `RepositoryError::Storage` if the write fails.
    pub fn create(&self, shelter: Shelter) -> Result<Shelter, RepositoryError> {
        required("name", &shelter.name)?;

        if email_in_use(self.store, shelter.email.as_str()) {
            return Err(RepositoryError::Conflict(format!(
                "email {} already registered",
                shelter.email
            )));
        }

        let shelter = self.collection().insert(shelter)?;
        info!(shelter_id = %shelter.id, approved = shelter.approved, "Created shelter");
        Ok(shelter)
    }

    /// Replace a shelter by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no shelter has this ID.
    /// Returns `RepositoryError::Conflict` if the email now collides with another account.
    /// Returns `RepositoryError::Storage` if the write fails.
    pub fn update(&self, shelter: Shelter) -> Result<Shelter, RepositoryError> {
        let current = self
            .get_by_id(&shelter.id)
            .ok_or_else(|| RepositoryError::NotFound(format!("shelter {}", shelter.id)))?;

        if !current.email.matches(shelter.email.as_str())
            && email_in_use(self.store, shelter.email.as_str())
        {
            return Err(RepositoryError::Conflict(format!(
                "email {} already registered",
                shelter.email
            )));
        }

        let shelter = self.collection().replace(shelter)?;
        debug!(shelter_id = %shelter.id, state = %shelter.state(), "Updated shelter");
        Ok(shelter)
    }
}
