//! Adoption application repository.

use pet_portal_core::{ApplicationId, ShelterId, UserId};
use tracing::{debug, info};

use super::{Collection, Record, RepositoryError};
use crate::models::{Application, Pet, ValidationError};
use crate::store::{Store, keys};

impl Record for Application {
    const KEY: &'static str = keys::APPLICATIONS;
    const NAME: &'static str = "application";

    type Id = ApplicationId;

    fn id(&self) -> &ApplicationId {
        &self.id
    }
}

/// Repository for adoption applications.
pub struct ApplicationRepository<'a> {
    store: &'a Store,
}

impl<'a> ApplicationRepository<'a> {
    /// Create a new application repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    fn collection(&self) -> Collection<'a, Application> {
        Collection::new(self.store)
    }

    /// Every application, in submission order.
    #[must_use]
    pub fn list(&self) -> Vec<Application> {
        self.collection().load()
    }

    /// Get an application by ID.
    #[must_use]
    pub fn get_by_id(&self, id: &ApplicationId) -> Option<Application> {
        self.collection().find(id)
    }

    /// Applications submitted by `user_id`, in submission order.
    #[must_use]
    pub fn list_by_user(&self, user_id: &UserId) -> Vec<Application> {
        self.list()
            .into_iter()
            .filter(|application| &application.user_id == user_id)
            .collect()
    }

    /// Applications addressed to `shelter_id`, in submission order.
    #[must_use]
    pub fn list_by_shelter(&self, shelter_id: &ShelterId) -> Vec<Application> {
        let applications: Vec<Application> = self
            .list()
            .into_iter()
            .filter(|application| &application.shelter_id == shelter_id)
            .collect();

        debug!(%shelter_id, count = applications.len(), "Listed shelter applications");
        applications
    }

    /// Create a new application.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if the pet does not exist, the
    /// shelter does not match the pet's, or an applicant field is invalid.
    /// Returns `RepositoryError::Conflict` if the ID is taken.
    /// Returns `RepositoryError::Storage` if the write fails.
    pub fn create(&self, application: Application) -> Result<Application, RepositoryError> {
        let pet = Collection::<Pet>::new(self.store)
            .find(&application.pet_id)
            .ok_or_else(|| {
                ValidationError::new("petId", format!("unknown pet {}", application.pet_id))
            })?;

        if pet.shelter_id != application.shelter_id {
            return Err(ValidationError::new(
                "shelterId",
                format!(
                    "application names {} but pet belongs to {}",
                    application.shelter_id, pet.shelter_id
                ),
            )
            .into());
        }

        let applicant = application.applicant.validated()?;
        let application = self
            .collection()
            .insert(Application {
                applicant,
                ..application
            })?;

        info!(
            application_id = %application.id,
            pet_id = %application.pet_id,
            user_id = %application.user_id,
            "Created application"
        );
        Ok(application)
    }

    /// Replace an application by ID.
    ///
    /// Only a pending application can change, and only its status, decision
    /// time and applicant details; the pet, shelter, user and submission time
    /// are fixed at submission.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no application has this ID.
    /// Returns `RepositoryError::Validation` if the stored application is
    /// already decided or a fixed field differs.
    /// Returns `RepositoryError::Storage` if the write fails.
    pub fn update(&self, application: Application) -> Result<Application, RepositoryError> {
        let current = self.get_by_id(&application.id).ok_or_else(|| {
            RepositoryError::NotFound(format!("application {}", application.id))
        })?;

        if current.status.is_terminal() {
            return Err(ValidationError::new(
                "status",
                format!("application {} is already {}", current.id, current.status),
            )
            .into());
        }

        let fixed = [
            ("petId", current.pet_id == application.pet_id),
            ("shelterId", current.shelter_id == application.shelter_id),
            ("userId", current.user_id == application.user_id),
            ("createdAt", current.created_at == application.created_at),
        ];
        if let Some((field, _)) = fixed.into_iter().find(|(_, unchanged)| !unchanged) {
            return Err(ValidationError::new(field, "cannot change after submission").into());
        }

        let application = self.collection().replace(application)?;
        debug!(
            application_id = %application.id,
            status = %application.status,
            "Updated application"
        );
        Ok(application)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pet_portal_core::ApplicationStatus;

    use super::*;
    use crate::db::test_support::{application, pet, shelter};
    use crate::db::{PetRepository, ShelterRepository};

    fn seeded() -> (Store, Pet) {
        let store = Store::in_memory();
        ShelterRepository::new(&store)
            .create(shelter("shelter-1", "a@shelter.org", true))
            .unwrap();
        ShelterRepository::new(&store)
            .create(shelter("shelter-2", "b@shelter.org", true))
            .unwrap();
        let milo = PetRepository::new(&store)
            .create(pet("pet-101", "shelter-1", "Dog"))
            .unwrap();
        (store, milo)
    }

    #[test]
    fn test_create_and_query() {
        let (store, milo) = seeded();
        let repo = ApplicationRepository::new(&store);

        repo.create(application("app-1", &milo, "user-1")).unwrap();

        assert_eq!(repo.list_by_user(&UserId::new("user-1")).len(), 1);
        assert!(repo.list_by_user(&UserId::new("user-2")).is_empty());
        assert_eq!(
            repo.list_by_shelter(&ShelterId::new("shelter-1")).len(),
            1
        );
        assert!(repo
            .list_by_shelter(&ShelterId::new("shelter-2"))
            .is_empty());
    }

    #[test]
    fn test_shelter_must_match_pet() {
        let (store, milo) = seeded();
        let repo = ApplicationRepository::new(&store);
        let mut forged = application("app-1", &milo, "user-1");
        forged.shelter_id = ShelterId::new("shelter-2");

        match repo.create(forged).unwrap_err() {
            RepositoryError::Validation(e) => assert_eq!(e.field, "shelterId"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_pet_rejected() {
        let (store, mut ghost) = seeded();
        ghost.id = pet_portal_core::PetId::new("pet-999");
        let repo = ApplicationRepository::new(&store);

        match repo.create(application("app-1", &ghost, "user-1")).unwrap_err() {
            RepositoryError::Validation(e) => assert_eq!(e.field, "petId"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decided_application_is_frozen() {
        let (store, milo) = seeded();
        let repo = ApplicationRepository::new(&store);
        let mut rejected = repo.create(application("app-1", &milo, "user-1")).unwrap();
        rejected.status = ApplicationStatus::Rejected;
        let rejected = repo.update(rejected).unwrap();

        let mut reopened = rejected.clone();
        reopened.status = ApplicationStatus::Pending;
        reopened.shelter_id = ShelterId::new("shelter-2");
        match repo.update(reopened).unwrap_err() {
            RepositoryError::Validation(e) => assert_eq!(e.field, "status"),
            other => panic!("unexpected error: {other:?}"),
        }

        let stored = repo.get_by_id(&rejected.id).unwrap();
        assert_eq!(stored, rejected);
    }

    #[test]
    fn test_fixed_fields_cannot_change() {
        let (store, milo) = seeded();
        let repo = ApplicationRepository::new(&store);
        let original = repo.create(application("app-1", &milo, "user-1")).unwrap();

        let mut moved = original.clone();
        moved.shelter_id = ShelterId::new("shelter-2");
        let mut reassigned = original.clone();
        reassigned.user_id = UserId::new("user-2");
        let mut repointed = original.clone();
        repointed.pet_id = pet_portal_core::PetId::new("pet-102");

        for (forged, field) in [(moved, "shelterId"), (reassigned, "userId"), (repointed, "petId")] {
            match repo.update(forged).unwrap_err() {
                RepositoryError::Validation(e) => assert_eq!(e.field, field),
                other => panic!("unexpected error: {other:?}"),
            }
        }
        assert_eq!(repo.get_by_id(&original.id).unwrap(), original);
    }

    #[test]
    fn test_applicant_validated() {
        let (store, milo) = seeded();
        let repo = ApplicationRepository::new(&store);
        let mut incomplete = application("app-1", &milo, "user-1");
        incomplete.applicant.housing = String::new();

        assert!(matches!(
            repo.create(incomplete),
            Err(RepositoryError::Validation(_))
        ));
        assert!(repo.list().is_empty());
    }
}
