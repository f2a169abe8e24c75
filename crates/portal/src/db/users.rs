//! User repository for adopter accounts.

use pet_portal_core::UserId;
use tracing::{debug, info};

use super::{Collection, Record, RepositoryError, email_in_use};
use crate::models::User;
use crate::models::validation::required;
use crate::store::{Store, keys};

impl Record for User {
    const KEY: &'static str = keys::USERS;
    const NAME: &'static str = "user";

    type Id = UserId;

    fn id(&self) -> &UserId {
        &self.id
    }
}

/// Repository for adopter accounts.
pub struct UserRepository<'a> {
    store: &'a Store,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    fn collection(&self) -> Collection<'a, User> {
        Collection::new(self.store)
    }

    /// Every user, in registration order.
    #[must_use]
    pub fn list(&self) -> Vec<User> {
        self.collection().load()
    }

    /// Get a user by ID.
    #[must_use]
    pub fn get_by_id(&self, id: &UserId) -> Option<User> {
        self.collection().find(id)
    }

    /// Get a user by email (case-insensitive).
    #[must_use]
    pub fn get_by_email(&self, email: &str) -> Option<User> {
        self.list().into_iter().find(|user| user.email.matches(email))
    }

    /// Create a new user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if the name is blank.
    /// Returns `RepositoryError::Conflict` if the email belongs to any account
    /// or the ID is taken.
    /// Returns `RepositoryError::Storage` if the write fails.
    pub fn create(&self, user: User) -> Result<User, RepositoryError> {
        required("name", &user.name)?;

        if email_in_use(self.store, user.email.as_str()) {
            return Err(RepositoryError::Conflict(format!(
                "email {} already registered",
                user.email
            )));
        }

        let user = self.collection().insert(user)?;
        info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    /// Replace a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no user has this ID.
    /// Returns `RepositoryError::Conflict` if the email now collides with another account.
    /// Returns `RepositoryError::Storage` if the write fails.
    pub fn update(&self, user: User) -> Result<User, RepositoryError> {
        let current = self
            .get_by_id(&user.id)
            .ok_or_else(|| RepositoryError::NotFound(format!("user {}", user.id)))?;

        if !current.email.matches(user.email.as_str()) && email_in_use(self.store, user.email.as_str())
        {
            return Err(RepositoryError::Conflict(format!(
                "email {} already registered",
                user.email
            )));
        }

        let user = self.collection().replace(user)?;
        debug!(user_id = %user.id, "Updated user");
        Ok(user)
    }
}
