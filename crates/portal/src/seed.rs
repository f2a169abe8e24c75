//! Demo dataset bootstrap.
//!
//! Populates empty collections on first run. A collection that already holds
//! records is never overwritten, even when some of them no longer decode, so
//! seeding is safe to run on every start.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{info, instrument, warn};

use pet_portal_core::{AgeMonths, Email, Password, PetId, PetStatus, ShelterId, UserId};

use crate::db::{PetRepository, RepositoryError, ShelterRepository};
use crate::models::{Application, Pet, Shelter, User};
use crate::store::{StorageError, Store, keys};

/// What a seeding run changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Shelters inserted.
    pub shelters: usize,
    /// Users inserted.
    pub users: usize,
    /// Pets inserted.
    pub pets: usize,
    /// Whether the application collection was (re)initialized to empty.
    pub applications_initialized: bool,
}

impl SeedReport {
    /// Whether the run left every collection untouched.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.shelters == 0 && self.users == 0 && self.pets == 0 && !self.applications_initialized
    }
}

/// Seed every empty collection with the demo dataset.
///
/// Seeded pets are only inserted for shelters that exist after the shelter
/// step, so a store with user-created shelters never gains dangling pets.
///
/// # Errors
///
/// Returns `RepositoryError::Storage` if a write fails.
#[instrument(skip(store))]
pub fn initialize_if_empty(store: &Store) -> Result<SeedReport, RepositoryError> {
    let now = Utc::now();
    let mut report = SeedReport::default();

    if needs_seed(store, keys::SHELTERS) {
        let shelters = demo_shelters(now);
        store.save(keys::SHELTERS, &shelters)?;
        report.shelters = shelters.len();
    }

    if needs_seed(store, keys::USERS) {
        let users = demo_users(now);
        store.save(keys::USERS, &users)?;
        report.users = users.len();
    }

    if needs_seed(store, keys::PETS) {
        report.pets = seed_pets(store, now)?;
    }

    report.applications_initialized = initialize_applications(store)?;

    if report.is_noop() {
        info!("Store already seeded");
    } else {
        info!(
            shelters = report.shelters,
            users = report.users,
            pets = report.pets,
            applications_initialized = report.applications_initialized,
            "Seeded demo data"
        );
    }
    Ok(report)
}

/// Clear the pet catalog and seed it again. Other collections are untouched.
///
/// Returns how many pets were seeded.
///
/// # Errors
///
/// Returns `RepositoryError::Storage` if a write fails.
#[instrument(skip(store))]
pub fn reset_pet_catalog(store: &Store) -> Result<usize, RepositoryError> {
    PetRepository::new(store).clear()?;
    let seeded = seed_pets(store, Utc::now())?;
    info!(pets = seeded, "Pet catalog reset");
    Ok(seeded)
}

fn seed_pets(store: &Store, now: DateTime<Utc>) -> Result<usize, RepositoryError> {
    let shelters = ShelterRepository::new(store).list();
    let pets: Vec<Pet> = demo_pets(now)
        .into_iter()
        .filter(|pet| shelters.iter().any(|s| s.id == pet.shelter_id))
        .collect();

    store.save(keys::PETS, &pets)?;
    Ok(pets.len())
}

/// What a collection key currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stored {
    Absent,
    /// An empty list.
    Empty,
    /// A list with at least one element, decodable or not.
    Records,
    /// Not JSON, or JSON that is not a list.
    Malformed,
    /// The medium could not be read.
    Unreadable,
}

fn inspect(store: &Store, key: &str) -> Stored {
    match store.load_json(key) {
        Ok(None) => Stored::Absent,
        Ok(Some(Value::Array(items))) if items.is_empty() => Stored::Empty,
        Ok(Some(Value::Array(_))) => Stored::Records,
        Ok(Some(_)) | Err(StorageError::Malformed { .. }) => Stored::Malformed,
        Err(e) => {
            warn!(key, error = %e, "Collection unreadable, leaving it in place");
            Stored::Unreadable
        }
    }
}

/// Whether `key` holds no records, so demo data may be written there.
///
/// A list is never replaced while it has elements, even ones that no longer
/// decode. A value that is not a list at all holds nothing to keep.
fn needs_seed(store: &Store, key: &str) -> bool {
    match inspect(store, key) {
        Stored::Absent | Stored::Empty => true,
        Stored::Malformed => {
            warn!(key, "Malformed collection replaced with demo data");
            true
        }
        Stored::Records | Stored::Unreadable => false,
    }
}

/// Make sure the application collection holds a list.
fn initialize_applications(store: &Store) -> Result<bool, RepositoryError> {
    let needs_reset = match inspect(store, keys::APPLICATIONS) {
        Stored::Absent => true,
        Stored::Malformed => {
            warn!("Malformed application collection replaced with an empty list");
            true
        }
        Stored::Empty | Stored::Records | Stored::Unreadable => false,
    };

    if needs_reset {
        store.save(keys::APPLICATIONS, &Vec::<Application>::new())?;
    }
    Ok(needs_reset)
}

fn demo_shelters(now: DateTime<Utc>) -> Vec<Shelter> {
    vec![
        Shelter {
            id: ShelterId::new("shelter-1"),
            name: "Green Paws Rescue".to_owned(),
            email: Email::from_stored("greenpaws@shelter.org"),
            password: Password::from_stored("Shelter@123"),
            phone: "+1 (555) 220-1180".to_owned(),
            city: "Riverdale".to_owned(),
            approved: true,
            blocked: false,
            created_at: now,
        },
        Shelter {
            id: ShelterId::new("shelter-2"),
            name: "Sunny Tails Haven".to_owned(),
            email: Email::from_stored("sunnytails@shelter.org"),
            password: Password::from_stored("Shelter@123"),
            phone: "+1 (555) 220-1189".to_owned(),
            city: "Laketown".to_owned(),
            approved: false,
            blocked: false,
            created_at: now,
        },
    ]
}

fn demo_users(now: DateTime<Utc>) -> Vec<User> {
    vec![User {
        id: UserId::new("user-1"),
        name: "Aarav Singh".to_owned(),
        email: Email::from_stored("aarav@petportal-mail.com"),
        password: Password::from_stored("User@1234"),
        phone: "+1 (555) 110-2401".to_owned(),
        city: "Riverdale".to_owned(),
        blocked: false,
        created_at: now,
    }]
}

/// Fields that differ between demo pets.
struct DemoPet {
    id: &'static str,
    name: &'static str,
    species: &'static str,
    breed: &'static str,
    gender: &'static str,
    age_months: u32,
    size: &'static str,
    color: &'static str,
    energy: &'static str,
    good_with_kids: bool,
    good_with_pets: bool,
    shelter_id: &'static str,
    location: &'static str,
    story: &'static str,
    traits: [&'static str; 3],
    images: [&'static str; 2],
}

const DEMO_PETS: [DemoPet; 4] = [
    DemoPet {
        id: "pet-101",
        name: "Milo",
        species: "Dog",
        breed: "Labrador Mix",
        gender: "Male",
        age_months: 18,
        size: "Medium",
        color: "Golden",
        energy: "Playful",
        good_with_kids: true,
        good_with_pets: true,
        shelter_id: "shelter-1",
        location: "Riverdale",
        story: "Milo is confident, affectionate, and eager to learn. He loves fetch and settles quickly once he trusts you.",
        traits: [
            "Great leash manners",
            "Food motivated",
            "Friendly with visitors",
        ],
        images: [
            "https://images.unsplash.com/photo-1558788353-f76d92427f16",
            "https://images.unsplash.com/photo-1548199973-03cce0bbc87b",
        ],
    },
    DemoPet {
        id: "pet-102",
        name: "Luna",
        species: "Cat",
        breed: "Domestic Shorthair",
        gender: "Female",
        age_months: 10,
        size: "Small",
        color: "Grey",
        energy: "Calm",
        good_with_kids: true,
        good_with_pets: false,
        shelter_id: "shelter-1",
        location: "Riverdale",
        story: "Luna is a gentle lap cat who enjoys window watching and quiet corners. She thrives in calm homes.",
        traits: [
            "Indoor-only",
            "Litter trained",
            "Prefers a single-pet home",
        ],
        images: [
            "https://images.unsplash.com/photo-1518791841217-8f162f1e1131",
            "https://images.unsplash.com/photo-1516972810927-80185027ca84",
        ],
    },
    DemoPet {
        id: "pet-104",
        name: "Pepper",
        species: "Cat",
        breed: "Tuxedo",
        gender: "Male",
        age_months: 22,
        size: "Medium",
        color: "Black & White",
        energy: "Curious",
        good_with_kids: true,
        good_with_pets: true,
        shelter_id: "shelter-2",
        location: "Laketown",
        story: "Pepper is confident and affectionate. He loves interactive toys and following you from room to room.",
        traits: ["Talkative", "Food motivated", "Enjoys playtime"],
        images: [
            "https://images.unsplash.com/photo-1543852786-1cf6624b9987",
            "https://images.unsplash.com/photo-1514888286974-6c03e2ca1dba",
        ],
    },
    DemoPet {
        id: "pet-105",
        name: "Kiwi",
        species: "Dog",
        breed: "Border Collie",
        gender: "Male",
        age_months: 14,
        size: "Medium",
        color: "Black",
        energy: "High",
        good_with_kids: false,
        good_with_pets: true,
        shelter_id: "shelter-2",
        location: "Laketown",
        story: "Kiwi is smart and driven. He does best with active adopters who enjoy training and structured play.",
        traits: ["Loves puzzles", "Fast learner", "Needs exercise"],
        images: [
            "https://images.unsplash.com/photo-1517849845537-4d257902454a",
            "https://images.unsplash.com/photo-1507146426996-ef05306b995a",
        ],
    },
];

fn demo_pets(now: DateTime<Utc>) -> Vec<Pet> {
    DEMO_PETS
        .iter()
        .map(|demo| Pet {
            id: PetId::new(demo.id),
            name: demo.name.to_owned(),
            species: demo.species.to_owned(),
            breed: demo.breed.to_owned(),
            gender: demo.gender.to_owned(),
            age_months: AgeMonths::new(demo.age_months),
            size: demo.size.to_owned(),
            color: demo.color.to_owned(),
            vaccinated: true,
            neutered: true,
            energy: demo.energy.to_owned(),
            good_with_kids: demo.good_with_kids,
            good_with_pets: demo.good_with_pets,
            shelter_id: ShelterId::new(demo.shelter_id),
            location: demo.location.to_owned(),
            status: PetStatus::Available,
            story: demo.story.to_owned(),
            traits: demo.traits.iter().map(|t| (*t).to_owned()).collect(),
            images: demo.images.iter().map(|i| (*i).to_owned()).collect(),
            created_at: now,
        })
        .collect()
}
