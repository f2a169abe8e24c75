//! Adoption applications: submission by adopters, decisions by shelters.
//!
//! Application state machine:
//!
//! ```text
//! pending --approve--> approved   (pet becomes adopted)
//! pending --reject---> rejected
//! ```
//!
//! Approved and rejected are terminal.

use chrono::Utc;
use tracing::{error, info, instrument, warn};

use pet_portal_core::{ApplicationId, ApplicationStatus, Decision, PetId, Role};

use super::WorkflowError;
use super::auth::authorize;
use crate::db::{ApplicationRepository, PetRepository};
use crate::models::{Applicant, Application, ApplicationCounts, Session};
use crate::store::Store;

/// An adopter's applications with per-status counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserApplications {
    /// Newest first.
    pub applications: Vec<Application>,
    pub counts: ApplicationCounts,
}

/// Application submission and decisions.
pub struct AdoptionService<'a> {
    pets: PetRepository<'a>,
    applications: ApplicationRepository<'a>,
}

impl<'a> AdoptionService<'a> {
    /// Create a new adoption service.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self {
            pets: PetRepository::new(store),
            applications: ApplicationRepository::new(store),
        }
    }

    /// Submit an application for an available pet.
    ///
    /// The pet's name and shelter are copied onto the application.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Auth` unless `session` is an adopter.
    /// Returns `WorkflowError::NotFound` if the pet does not exist.
    /// Returns `WorkflowError::PetUnavailable` if the pet is already adopted.
    /// Returns `WorkflowError::Repository` if an applicant field is invalid.
    #[instrument(skip(self, session, applicant), fields(user_id = %session.id))]
    pub fn submit(
        &self,
        session: &Session,
        pet_id: &PetId,
        applicant: Applicant,
    ) -> Result<Application, WorkflowError> {
        let session = authorize(Some(session), &[Role::User])?;

        let pet = self
            .pets
            .get_by_id(pet_id)
            .ok_or_else(|| WorkflowError::not_found("pet", pet_id))?;
        if !pet.is_available() {
            return Err(WorkflowError::PetUnavailable(pet.id));
        }

        let application = self.applications.create(Application {
            id: ApplicationId::generate(),
            pet_id: pet.id,
            pet_name: pet.name,
            shelter_id: pet.shelter_id,
            user_id: session.id.to_user_id(),
            status: ApplicationStatus::Pending,
            created_at: Utc::now(),
            updated_at: None,
            applicant,
        })?;

        info!(application_id = %application.id, "Application submitted");
        Ok(application)
    }

    /// Approve or reject a pending application addressed to the calling shelter.
    ///
    /// Approval marks the pet adopted. The pet catalog is written first and
    /// restored if the application write then fails, so either both changes
    /// land or neither does. An approval whose pet has disappeared still
    /// succeeds; one whose pet was already adopted through another
    /// application is refused and stays pending.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Auth` unless `session` is a shelter.
    /// Returns `WorkflowError::NotFound` if the application does not exist.
    /// Returns `WorkflowError::Forbidden` if another shelter owns it.
    /// Returns `WorkflowError::AlreadyDecided` if it is no longer pending.
    /// Returns `WorkflowError::PetUnavailable` when approving for a pet that
    /// is already adopted.
    /// Returns `WorkflowError::Repository` if a write fails.
    #[instrument(skip(self, session), fields(shelter_id = %session.id))]
    pub fn decide(
        &self,
        session: &Session,
        id: &ApplicationId,
        decision: Decision,
    ) -> Result<Application, WorkflowError> {
        let session = authorize(Some(session), &[Role::Shelter])?;

        let mut application = self
            .applications
            .get_by_id(id)
            .ok_or_else(|| WorkflowError::not_found("application", id))?;

        if !session.is_account(&application.shelter_id) {
            return Err(WorkflowError::Forbidden(format!(
                "application {id} belongs to another shelter"
            )));
        }

        if application.status.is_terminal() {
            return Err(WorkflowError::AlreadyDecided {
                id: application.id,
                status: application.status,
            });
        }

        application.status = decision.target_status();
        application.updated_at = Some(Utc::now());

        let application = match decision {
            Decision::Reject => self.applications.update(application)?,
            Decision::Approve => self.approve_with_cascade(application)?,
        };

        info!(
            application_id = %application.id,
            status = %application.status,
            "Application decided"
        );
        Ok(application)
    }

    fn approve_with_cascade(&self, application: Application) -> Result<Application, WorkflowError> {
        let catalog = self.pets.snapshot()?;

        match self.pets.get_by_id(&application.pet_id) {
            None => {
                warn!(
                    application_id = %application.id,
                    pet_id = %application.pet_id,
                    "Approved application references a missing pet"
                );
                return Ok(self.applications.update(application)?);
            }
            Some(pet) if !pet.is_available() => {
                return Err(WorkflowError::PetUnavailable(pet.id));
            }
            Some(_) => {}
        }

        self.pets.mark_adopted(&application.pet_id)?;

        match self.applications.update(application) {
            Ok(application) => Ok(application),
            Err(e) => {
                if let Err(rollback) = self.pets.restore(catalog.as_deref()) {
                    error!(error = %rollback, "Failed to restore pet catalog after aborted approval");
                }
                Err(e.into())
            }
        }
    }

    /// The adopter's applications, newest first, with counts.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Auth` unless `session` is an adopter.
    pub fn my_applications(&self, session: &Session) -> Result<UserApplications, WorkflowError> {
        let session = authorize(Some(session), &[Role::User])?;

        let mut applications = self.applications.list_by_user(&session.id.to_user_id());
        applications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let counts = ApplicationCounts::tally(&applications);

        Ok(UserApplications {
            applications,
            counts,
        })
    }

    /// Applications addressed to the calling shelter, newest first.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Auth` unless `session` is a shelter.
    pub fn shelter_applications(
        &self,
        session: &Session,
    ) -> Result<Vec<Application>, WorkflowError> {
        let session = authorize(Some(session), &[Role::Shelter])?;

        let mut applications = self
            .applications
            .list_by_shelter(&session.id.to_shelter_id());
        applications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(applications)
    }
}
