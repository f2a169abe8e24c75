//! Administrator moderation of shelters and adopters.
//!
//! Shelter state machine:
//!
//! ```text
//! unapproved --approve--> approved
//! any --block--> blocked (approved cleared)
//! blocked --unblock--> unapproved
//! ```
//!
//! Unblocking never re-approves; the administrator approves again separately.

use tracing::{info, instrument};

use pet_portal_core::{Role, ShelterId, UserId};

use super::WorkflowError;
use super::auth::authorize;
use crate::db::{ShelterRepository, UserRepository};
use crate::models::{Session, Shelter, User};
use crate::store::Store;

/// Administrator-only account moderation.
pub struct ModerationService<'a> {
    users: UserRepository<'a>,
    shelters: ShelterRepository<'a>,
}

impl<'a> ModerationService<'a> {
    /// Create a new moderation service.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self {
            users: UserRepository::new(store),
            shelters: ShelterRepository::new(store),
        }
    }

    /// Approve a shelter, clearing any block.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Auth` unless `session` is the administrator.
    /// Returns `WorkflowError::NotFound` if the shelter does not exist.
    #[instrument(skip(self, session), fields(shelter_id = %id))]
    pub fn approve_shelter(
        &self,
        session: &Session,
        id: &ShelterId,
    ) -> Result<Shelter, WorkflowError> {
        authorize(Some(session), &[Role::Admin])?;

        let mut shelter = self
            .shelters
            .get_by_id(id)
            .ok_or_else(|| WorkflowError::not_found("shelter", id))?;
        shelter.approved = true;
        shelter.blocked = false;

        let shelter = self.shelters.update(shelter)?;
        info!(shelter_id = %shelter.id, "Shelter approved");
        Ok(shelter)
    }

    /// Flip a shelter's block flag. Blocking also revokes approval.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Auth` unless `session` is the administrator.
    /// Returns `WorkflowError::NotFound` if the shelter does not exist.
    #[instrument(skip(self, session), fields(shelter_id = %id))]
    pub fn toggle_shelter_block(
        &self,
        session: &Session,
        id: &ShelterId,
    ) -> Result<Shelter, WorkflowError> {
        authorize(Some(session), &[Role::Admin])?;

        let mut shelter = self
            .shelters
            .get_by_id(id)
            .ok_or_else(|| WorkflowError::not_found("shelter", id))?;
        shelter.blocked = !shelter.blocked;
        if shelter.blocked {
            shelter.approved = false;
        }

        let shelter = self.shelters.update(shelter)?;
        info!(shelter_id = %shelter.id, state = %shelter.state(), "Shelter block toggled");
        Ok(shelter)
    }

    /// Approve every shelter that is neither approved nor blocked.
    ///
    /// Returns how many shelters changed.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Auth` unless `session` is the administrator.
    /// Returns `WorkflowError::Repository` if a write fails; shelters approved
    /// before the failure stay approved.
    #[instrument(skip(self, session))]
    pub fn approve_all(&self, session: &Session) -> Result<usize, WorkflowError> {
        authorize(Some(session), &[Role::Admin])?;

        let mut changed = 0;
        for mut shelter in self.shelters.list() {
            if shelter.approved || shelter.blocked {
                continue;
            }
            shelter.approved = true;
            self.shelters.update(shelter)?;
            changed += 1;
        }

        info!(changed, "Approved pending shelters");
        Ok(changed)
    }

    /// Flip an adopter's block flag.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Auth` unless `session` is the administrator.
    /// Returns `WorkflowError::NotFound` if the user does not exist.
    #[instrument(skip(self, session), fields(user_id = %id))]
    pub fn toggle_user_block(&self, session: &Session, id: &UserId) -> Result<User, WorkflowError> {
        authorize(Some(session), &[Role::Admin])?;

        let mut user = self
            .users
            .get_by_id(id)
            .ok_or_else(|| WorkflowError::not_found("user", id))?;
        user.blocked = !user.blocked;

        let user = self.users.update(user)?;
        info!(user_id = %user.id, blocked = user.blocked, "User block toggled");
        Ok(user)
    }
}
