//! Pet catalog: shelter publication and adopter browsing.

use chrono::Utc;
use tracing::{info, instrument};

use pet_portal_core::{PetId, PetStatus, Role};

use super::WorkflowError;
use super::auth::authorize;
use crate::db::{PetRepository, ShelterRepository};
use crate::models::validation::clean_list;
use crate::models::{MAX_IMAGES, Pet, PetDraft, PetFilter, Session};
use crate::store::Store;

/// Pet publication and browsing.
pub struct CatalogService<'a> {
    pets: PetRepository<'a>,
    shelters: ShelterRepository<'a>,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self {
            pets: PetRepository::new(store),
            shelters: ShelterRepository::new(store),
        }
    }

    /// Available pets passing `filter`.
    #[must_use]
    pub fn list_available(&self, filter: &PetFilter) -> Vec<Pet> {
        self.pets.list_available(filter)
    }

    /// Any pet by ID, regardless of status.
    #[must_use]
    pub fn get_pet(&self, id: &PetId) -> Option<Pet> {
        self.pets.get_by_id(id)
    }

    /// Every pet owned by the calling shelter, regardless of status.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Auth` unless `session` is a shelter.
    pub fn shelter_pets(&self, session: &Session) -> Result<Vec<Pet>, WorkflowError> {
        let session = authorize(Some(session), &[Role::Shelter])?;
        Ok(self.pets.list_by_shelter(&session.id.to_shelter_id()))
    }

    /// Publish a new pet or edit one of the calling shelter's pets.
    ///
    /// A draft without an ID, or with an ID no pet uses, creates a listing.
    /// Editing keeps the listing's `created_at` and `status`. Traits and
    /// images are trimmed with blanks dropped; images beyond
    /// [`MAX_IMAGES`] are discarded. A blank location becomes the shelter's
    /// city.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::Auth` unless `session` is a shelter.
    /// Returns `WorkflowError::NotFound` if the shelter record is gone.
    /// Returns `WorkflowError::Forbidden` if the ID belongs to another shelter's pet.
    /// Returns `WorkflowError::Repository` if a required field is blank.
    #[instrument(skip(self, session, draft), fields(shelter_id = %session.id))]
    pub fn publish_or_update(
        &self,
        session: &Session,
        draft: PetDraft,
    ) -> Result<Pet, WorkflowError> {
        let session = authorize(Some(session), &[Role::Shelter])?;
        let shelter_id = session.id.to_shelter_id();
        let shelter = self
            .shelters
            .get_by_id(&shelter_id)
            .ok_or_else(|| WorkflowError::not_found("shelter", &shelter_id))?;

        let existing = draft.id.as_ref().and_then(|id| self.pets.get_by_id(id));
        if let Some(existing) = &existing
            && existing.shelter_id != shelter_id
        {
            return Err(WorkflowError::Forbidden(format!(
                "pet {} belongs to another shelter",
                existing.id
            )));
        }

        let mut images = clean_list(&draft.images);
        images.truncate(MAX_IMAGES);

        let location = match draft.location.trim() {
            "" => shelter.city.clone(),
            location => location.to_owned(),
        };

        let (status, created_at) = existing
            .as_ref()
            .map_or((PetStatus::Available, Utc::now()), |pet| {
                (pet.status, pet.created_at)
            });

        let pet = Pet {
            id: draft.id.unwrap_or_else(PetId::generate),
            name: draft.name.trim().to_owned(),
            species: draft.species.trim().to_owned(),
            breed: draft.breed.trim().to_owned(),
            gender: draft.gender.trim().to_owned(),
            age_months: draft.age_months,
            size: draft.size.trim().to_owned(),
            color: draft.color.trim().to_owned(),
            vaccinated: draft.vaccinated,
            neutered: draft.neutered,
            energy: draft.energy.trim().to_owned(),
            good_with_kids: draft.good_with_kids,
            good_with_pets: draft.good_with_pets,
            shelter_id,
            location,
            status,
            story: draft.story.trim().to_owned(),
            traits: clean_list(&draft.traits),
            images,
            created_at,
        };

        if existing.is_some() {
            let pet = self.pets.update(pet)?;
            info!(pet_id = %pet.id, "Pet listing updated");
            Ok(pet)
        } else {
            let pet = self.pets.create(pet)?;
            info!(pet_id = %pet.id, "Pet listing published");
            Ok(pet)
        }
    }
}
