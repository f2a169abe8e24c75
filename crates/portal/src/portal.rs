//! The presentation-facing facade.
//!
//! [`Portal`] owns the [`Store`] and wires it into the repositories and
//! services for each call. Front ends (the CLI, tests) use only this type.

use chrono::Utc;
use tracing::{info, instrument};

use pet_portal_core::{ApplicationId, Decision, PetId, PetStatus, Role, ShelterId, UserId};

use crate::config::PortalConfig;
use crate::db::{ApplicationRepository, PetRepository, ShelterRepository, UserRepository};
use crate::error::Result;
use crate::models::{
    Account, Applicant, Application, Pet, PetDraft, PetFilter, PortalStats, Registration, Session,
    Shelter, Snapshot, User,
};
use crate::seed::{self, SeedReport};
use crate::services::{
    AdoptionService, CatalogService, IdentityService, ModerationService, UserApplications,
};
use crate::store::Store;

/// Pet adoption portal.
#[derive(Debug)]
pub struct Portal {
    store: Store,
}

impl Portal {
    /// Wrap an existing store without seeding it.
    #[must_use]
    pub const fn with_store(store: Store) -> Self {
        Self { store }
    }

    /// A portal over a fresh in-memory store, seeded with the demo dataset.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::Repository` if seeding fails.
    pub fn in_memory() -> Result<Self> {
        let portal = Self::with_store(Store::in_memory());
        portal.initialize_if_empty()?;
        Ok(portal)
    }

    /// Open the file-backed store named by `config`, falling back to memory
    /// when it is unusable, and seed it if configured.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::Repository` if seeding fails.
    #[instrument(skip(config), fields(data_dir = %config.data_dir.display()))]
    pub fn open(config: &PortalConfig) -> Result<Self> {
        let portal = Self::with_store(Store::open_or_memory(&config.data_dir));
        if config.seed_on_open {
            portal.initialize_if_empty()?;
        }
        info!(persistent = portal.store.is_persistent(), "Portal opened");
        Ok(portal)
    }

    /// Load [`PortalConfig`] from the environment and [`open`](Self::open) it.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::Config` if the environment is invalid.
    pub fn from_env() -> Result<Self> {
        let config = PortalConfig::from_env()?;
        Self::open(&config)
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Seed every empty collection with the demo dataset.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::Repository` if a write fails.
    pub fn initialize_if_empty(&self) -> Result<SeedReport> {
        Ok(seed::initialize_if_empty(&self.store)?)
    }

    /// Clear the pet catalog and re-seed it. Returns how many pets were seeded.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::Repository` if a write fails.
    pub fn reset_pet_catalog(&self) -> Result<usize> {
        Ok(seed::reset_pet_catalog(&self.store)?)
    }

    /// Remove every portal key, including the session.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::Storage` if a key cannot be removed.
    pub fn reset(&self) -> Result<()> {
        self.store.reset()?;
        info!("Portal state reset");
        Ok(())
    }

    // =========================================================================
    // Identity
    // =========================================================================

    fn identity(&self) -> IdentityService<'_> {
        IdentityService::new(&self.store)
    }

    /// Find any account by email.
    #[must_use]
    pub fn find_account_by_email(&self, email: &str) -> Option<Account> {
        self.identity().find_account_by_email(email)
    }

    /// Check credentials and store the resulting session.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::Auth` with kind `NotFound`, `Blocked`,
    /// `BadCredential` or `PendingApproval`.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<Session> {
        Ok(self.identity().login(email, password)?)
    }

    /// Register an adopter or shelter.
    ///
    /// Adopters are signed in immediately; shelters wait for approval.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::Auth` with kind `Validation` or `Duplicate`.
    pub fn register(&self, registration: &Registration) -> Result<Account> {
        let identity = self.identity();
        let account = identity.register(registration)?;
        if account.account_type() == Role::User {
            identity.set_session(&account.to_session())?;
        }
        Ok(account)
    }

    /// Clear the stored session.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::Auth` if the medium cannot be written.
    pub fn logout(&self) -> Result<()> {
        self.identity().clear_session()?;
        info!("Logged out");
        Ok(())
    }

    /// The stored session, if any.
    #[must_use]
    pub fn current_session(&self) -> Option<Session> {
        self.identity().current_session()
    }

    /// The stored session, checked against `allowed` roles (empty admits any).
    ///
    /// # Errors
    ///
    /// Returns `PortalError::Auth` with kind `Unauthenticated` or `Forbidden`.
    pub fn require_session(&self, allowed: &[Role]) -> Result<Session> {
        Ok(self.identity().require(allowed)?)
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Available pets passing `filter`.
    #[must_use]
    pub fn list_available_pets(&self, filter: &PetFilter) -> Vec<Pet> {
        CatalogService::new(&self.store).list_available(filter)
    }

    /// Any pet by ID, regardless of status.
    #[must_use]
    pub fn get_pet(&self, id: &PetId) -> Option<Pet> {
        CatalogService::new(&self.store).get_pet(id)
    }

    /// Publish or edit one of the calling shelter's pets.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::Workflow` with kind `Unauthenticated`,
    /// `Forbidden`, `NotFound` or `Validation`.
    pub fn shelter_publish_pet(&self, session: &Session, draft: PetDraft) -> Result<Pet> {
        Ok(CatalogService::new(&self.store).publish_or_update(session, draft)?)
    }

    /// Every pet of the calling shelter.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::Workflow` unless `session` is a shelter.
    pub fn shelter_pets(&self, session: &Session) -> Result<Vec<Pet>> {
        Ok(CatalogService::new(&self.store).shelter_pets(session)?)
    }

    // =========================================================================
    // Adoption
    // =========================================================================

    /// Submit an application for an available pet.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::Workflow` with kind `Forbidden`, `NotFound`,
    /// `InvalidTransition` or `Validation`.
    pub fn submit_application(
        &self,
        session: &Session,
        pet_id: &PetId,
        applicant: Applicant,
    ) -> Result<Application> {
        Ok(AdoptionService::new(&self.store).submit(session, pet_id, applicant)?)
    }

    /// Approve or reject an application addressed to the calling shelter.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::Workflow` with kind `Forbidden`, `NotFound`,
    /// `InvalidTransition` or `StorageUnavailable`.
    pub fn shelter_decide_application(
        &self,
        session: &Session,
        id: &ApplicationId,
        decision: Decision,
    ) -> Result<Application> {
        Ok(AdoptionService::new(&self.store).decide(session, id, decision)?)
    }

    /// The adopter's applications, newest first, with counts.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::Workflow` unless `session` is an adopter.
    pub fn my_applications(&self, session: &Session) -> Result<UserApplications> {
        Ok(AdoptionService::new(&self.store).my_applications(session)?)
    }

    /// Applications addressed to the calling shelter, newest first.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::Workflow` unless `session` is a shelter.
    pub fn shelter_applications(&self, session: &Session) -> Result<Vec<Application>> {
        Ok(AdoptionService::new(&self.store).shelter_applications(session)?)
    }

    // =========================================================================
    // Moderation
    // =========================================================================

    /// Approve a shelter.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::Workflow` unless `session` is the administrator
    /// and the shelter exists.
    pub fn admin_approve_shelter(&self, session: &Session, id: &ShelterId) -> Result<Shelter> {
        Ok(ModerationService::new(&self.store).approve_shelter(session, id)?)
    }

    /// Flip a shelter's block flag.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::Workflow` unless `session` is the administrator
    /// and the shelter exists.
    pub fn admin_toggle_shelter_block(&self, session: &Session, id: &ShelterId) -> Result<Shelter> {
        Ok(ModerationService::new(&self.store).toggle_shelter_block(session, id)?)
    }

    /// Flip an adopter's block flag.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::Workflow` unless `session` is the administrator
    /// and the user exists.
    pub fn admin_toggle_user_block(&self, session: &Session, id: &UserId) -> Result<User> {
        Ok(ModerationService::new(&self.store).toggle_user_block(session, id)?)
    }

    /// Approve every unapproved, unblocked shelter. Returns how many changed.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::Workflow` unless `session` is the administrator.
    pub fn admin_approve_all_shelters(&self, session: &Session) -> Result<usize> {
        Ok(ModerationService::new(&self.store).approve_all(session)?)
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    /// Every persisted collection, stamped with the export time.
    #[must_use]
    pub fn export_snapshot(&self) -> Snapshot {
        Snapshot {
            exported_at: Utc::now(),
            users: UserRepository::new(&self.store).list(),
            shelters: ShelterRepository::new(&self.store).list(),
            pets: PetRepository::new(&self.store).list(),
            applications: ApplicationRepository::new(&self.store).list(),
        }
    }

    /// [`Self::export_snapshot`] as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `PortalError::Serialization` if encoding fails.
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.export_snapshot())?)
    }

    /// Headline numbers for the landing page.
    #[must_use]
    pub fn stats(&self) -> PortalStats {
        let pets = PetRepository::new(&self.store).list();
        PortalStats {
            available_pets: pets.iter().filter(|pet| pet.is_available()).count(),
            total_applications: ApplicationRepository::new(&self.store).list().len(),
            verified_shelters: ShelterRepository::new(&self.store)
                .list()
                .iter()
                .filter(|shelter| shelter.approved)
                .count(),
            adoptions: pets
                .iter()
                .filter(|pet| pet.status == PetStatus::Adopted)
                .count(),
        }
    }
}
