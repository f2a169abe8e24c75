//! Pet catalog repository.

use pet_portal_core::{PetId, PetStatus, ShelterId};
use tracing::{debug, info};

use super::{Collection, Record, RepositoryError};
use crate::models::validation::required;
use crate::models::{MAX_IMAGES, Pet, PetFilter, Shelter, ValidationError};
use crate::store::{Store, keys};

impl Record for Pet {
    const KEY: &'static str = keys::PETS;
    const NAME: &'static str = "pet";

    type Id = PetId;

    fn id(&self) -> &PetId {
        &self.id
    }
}

/// Repository for the pet catalog.
pub struct PetRepository<'a> {
    store: &'a Store,
}

impl<'a> PetRepository<'a> {
    /// Create a new pet repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    fn collection(&self) -> Collection<'a, Pet> {
        Collection::new(self.store)
    }

    /// Every pet regardless of status, in publication order.
    #[must_use]
    pub fn list(&self) -> Vec<Pet> {
        self.collection().load()
    }

    /// Get a pet by ID.
    #[must_use]
    pub fn get_by_id(&self, id: &PetId) -> Option<Pet> {
        self.collection().find(id)
    }

    /// Available pets passing `filter`.
    #[must_use]
    pub fn list_available(&self, filter: &PetFilter) -> Vec<Pet> {
        let pets: Vec<Pet> = self
            .list()
            .into_iter()
            .filter(|pet| pet.is_available() && filter.matches(pet))
            .collect();

        debug!(?filter, count = pets.len(), "Listed available pets");
        pets
    }

    /// Every pet owned by `shelter_id`, regardless of status.
    #[must_use]
    pub fn list_by_shelter(&self, shelter_id: &ShelterId) -> Vec<Pet> {
        self.list()
            .into_iter()
            .filter(|pet| &pet.shelter_id == shelter_id)
            .collect()
    }

    /// Create a new pet.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if a required field is blank, the
    /// pet has too many images, or its shelter does not exist.
    /// Returns `RepositoryError::Conflict` if the ID is taken.
    /// Returns `RepositoryError::Storage` if the write fails.
    pub fn create(&self, pet: Pet) -> Result<Pet, RepositoryError> {
        self.validate(&pet)?;
        let pet = self.collection().insert(pet)?;
        info!(pet_id = %pet.id, shelter_id = %pet.shelter_id, "Created pet");
        Ok(pet)
    }

    /// Replace a pet by ID.
    ///
    /// The owning shelter and the listing status cannot change here; adoption
    /// goes through the approval cascade.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` under the same rules as
    /// [`Self::create`], or if the shelter or status differs from the stored pet.
    /// Returns `RepositoryError::NotFound` if no pet has this ID.
    /// Returns `RepositoryError::Storage` if the write fails.
    pub fn update(&self, pet: Pet) -> Result<Pet, RepositoryError> {
        let current = self
            .get_by_id(&pet.id)
            .ok_or_else(|| RepositoryError::NotFound(format!("pet {}", pet.id)))?;

        if current.shelter_id != pet.shelter_id {
            return Err(ValidationError::new(
                "shelterId",
                format!("pet {} belongs to {}", pet.id, current.shelter_id),
            )
            .into());
        }
        if current.status != pet.status {
            return Err(ValidationError::new(
                "status",
                format!("pet {} is {}; status changes only on approval", pet.id, current.status),
            )
            .into());
        }

        self.validate(&pet)?;
        let pet = self.collection().replace(pet)?;
        debug!(pet_id = %pet.id, status = %pet.status, "Updated pet");
        Ok(pet)
    }

    /// Set a pet's status to adopted. `None` when the pet does not exist.
    pub(crate) fn mark_adopted(&self, id: &PetId) -> Result<Option<Pet>, RepositoryError> {
        let Some(mut pet) = self.get_by_id(id) else {
            return Ok(None);
        };
        pet.status = PetStatus::Adopted;
        let pet = self.collection().replace(pet)?;
        info!(pet_id = %pet.id, "Pet marked adopted");
        Ok(Some(pet))
    }

    /// Remove the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the medium cannot be written.
    pub fn clear(&self) -> Result<(), RepositoryError> {
        self.collection().clear()?;
        info!("Cleared pet catalog");
        Ok(())
    }

    /// The stored catalog verbatim, for undoing a multi-step write.
    pub(crate) fn snapshot(&self) -> Result<Option<String>, RepositoryError> {
        self.collection().snapshot()
    }

    /// Put back a catalog taken with [`Self::snapshot`].
    pub(crate) fn restore(&self, snapshot: Option<&str>) -> Result<(), RepositoryError> {
        self.collection().restore(snapshot)
    }

    fn validate(&self, pet: &Pet) -> Result<(), RepositoryError> {
        required("name", &pet.name)?;
        required("species", &pet.species)?;
        required("breed", &pet.breed)?;
        required("gender", &pet.gender)?;
        required("size", &pet.size)?;
        required("energy", &pet.energy)?;
        required("location", &pet.location)?;
        required("story", &pet.story)?;

        if pet.images.len() > MAX_IMAGES {
            return Err(ValidationError::new(
                "images",
                format!("at most {MAX_IMAGES} images are allowed"),
            )
            .into());
        }

        if Collection::<Shelter>::new(self.store)
            .find(&pet.shelter_id)
            .is_none()
        {
            return Err(ValidationError::new(
                "shelterId",
                format!("unknown shelter {}", pet.shelter_id),
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::ShelterRepository;
    use crate::db::test_support::{pet, shelter};
    use crate::store::StorageError;

    fn store_with_shelter() -> Store {
        let store = Store::in_memory();
        ShelterRepository::new(&store)
            .create(shelter("shelter-1", "greenpaws@shelter.org", true))
            .unwrap();
        store
    }

    #[test]
    fn test_create_requires_existing_shelter() {
        let store = store_with_shelter();
        let repo = PetRepository::new(&store);

        repo.create(pet("pet-1", "shelter-1", "Dog")).unwrap();
        let err = repo.create(pet("pet-2", "shelter-9", "Dog")).unwrap_err();
        match err {
            RepositoryError::Validation(e) => assert_eq!(e.field, "shelterId"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_image_cap() {
        let store = store_with_shelter();
        let repo = PetRepository::new(&store);
        let mut crowded = pet("pet-1", "shelter-1", "Dog");
        crowded.images = vec!["a".to_owned(), "b".to_owned(), "c".to_owned()];

        assert!(matches!(
            repo.create(crowded),
            Err(RepositoryError::Validation(_))
        ));
    }

    #[test]
    fn test_missing_required_field() {
        let store = store_with_shelter();
        let repo = PetRepository::new(&store);
        let mut nameless = pet("pet-1", "shelter-1", "Dog");
        nameless.story = String::new();

        match repo.create(nameless).unwrap_err() {
            RepositoryError::Validation(e) => assert_eq!(e.field, "story"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_list_available_hides_adopted() {
        let store = store_with_shelter();
        let repo = PetRepository::new(&store);
        repo.create(pet("pet-1", "shelter-1", "Dog")).unwrap();
        let mut adopted = pet("pet-2", "shelter-1", "Dog");
        adopted.status = PetStatus::Adopted;
        repo.create(adopted).unwrap();
        repo.create(pet("pet-3", "shelter-1", "Cat")).unwrap();

        let dogs = repo.list_available(&PetFilter::all().species("Dog"));
        assert_eq!(dogs.len(), 1);
        assert_eq!(dogs[0].id.as_str(), "pet-1");
        assert_eq!(repo.list_available(&PetFilter::all()).len(), 2);
        assert_eq!(repo.list_by_shelter(&ShelterId::new("shelter-1")).len(), 3);
    }

    #[test]
    fn test_clear_empties_catalog() {
        let store = store_with_shelter();
        let repo = PetRepository::new(&store);
        repo.create(pet("pet-1", "shelter-1", "Dog")).unwrap();

        repo.clear().unwrap();
        assert!(repo.list().is_empty());
    }

    #[test]
    fn test_update_cannot_move_or_adopt() {
        let store = store_with_shelter();
        ShelterRepository::new(&store)
            .create(shelter("shelter-2", "sunny@shelter.org", true))
            .unwrap();
        let repo = PetRepository::new(&store);
        let original = repo.create(pet("pet-1", "shelter-1", "Dog")).unwrap();

        let mut moved = original.clone();
        moved.shelter_id = ShelterId::new("shelter-2");
        match repo.update(moved).unwrap_err() {
            RepositoryError::Validation(e) => assert_eq!(e.field, "shelterId"),
            other => panic!("unexpected error: {other:?}"),
        }

        let mut adopted = original.clone();
        adopted.status = PetStatus::Adopted;
        match repo.update(adopted).unwrap_err() {
            RepositoryError::Validation(e) => assert_eq!(e.field, "status"),
            other => panic!("unexpected error: {other:?}"),
        }

        assert_eq!(repo.get_by_id(&original.id).unwrap(), original);
    }

    #[test]
    fn test_mark_adopted() {
        let store = store_with_shelter();
        let repo = PetRepository::new(&store);
        repo.create(pet("pet-1", "shelter-1", "Dog")).unwrap();

        let adopted = repo.mark_adopted(&PetId::new("pet-1")).unwrap().unwrap();
        assert_eq!(adopted.status, PetStatus::Adopted);
        assert!(repo.list_available(&PetFilter::all()).is_empty());
        assert!(repo.mark_adopted(&PetId::new("pet-404")).unwrap().is_none());
    }

    #[test]
    fn test_undecodable_record_survives_writes() {
        let store = store_with_shelter();
        let repo = PetRepository::new(&store);
        let milo = repo.create(pet("pet-1", "shelter-1", "Dog")).unwrap();

        let mut raw: Vec<serde_json::Value> = store.load(keys::PETS, Vec::new());
        let mut broken = serde_json::to_value(pet("pet-2", "shelter-1", "Cat")).unwrap();
        broken["ageMonths"] = serde_json::json!(2.5);
        raw.push(broken.clone());
        store.save(keys::PETS, &raw).unwrap();

        assert_eq!(repo.list(), vec![milo.clone()]);

        repo.create(pet("pet-3", "shelter-1", "Dog")).unwrap();
        let mut renamed = milo;
        renamed.name = "Custom Milo".to_owned();
        repo.update(renamed).unwrap();

        let stored: Vec<serde_json::Value> = store.load(keys::PETS, Vec::new());
        assert_eq!(stored.len(), 3);
        assert_eq!(stored[0]["name"], "Custom Milo");
        assert_eq!(stored[1], broken);
        assert_eq!(stored[2]["id"], "pet-3");
    }

    #[test]
    fn test_writes_refuse_non_list_value() {
        let store = store_with_shelter();
        store.backend().set(keys::PETS, r#"{"pets": []}"#).unwrap();
        let repo = PetRepository::new(&store);

        let err = repo.create(pet("pet-1", "shelter-1", "Dog")).unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::Storage(StorageError::Malformed { .. })
        ));
        assert_eq!(
            store.backend().get(keys::PETS).unwrap().as_deref(),
            Some(r#"{"pets": []}"#)
        );
    }

    #[test]
    fn test_snapshot_and_restore() {
        let store = store_with_shelter();
        let repo = PetRepository::new(&store);
        let snapshot = repo.snapshot().unwrap();
        assert!(snapshot.is_none());

        repo.create(pet("pet-1", "shelter-1", "Dog")).unwrap();
        repo.restore(snapshot.as_deref()).unwrap();
        assert!(store.backend().get(keys::PETS).unwrap().is_none());
    }

    #[test]
    fn test_update_missing_pet() {
        let store = store_with_shelter();
        let repo = PetRepository::new(&store);
        assert!(matches!(
            repo.update(pet("pet-404", "shelter-1", "Dog")),
            Err(RepositoryError::NotFound(_))
        ));
    }
}
