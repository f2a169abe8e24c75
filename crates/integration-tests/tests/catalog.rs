//! Pet browsing, filtering and publication tests.

use pet_portal::ErrorKind;
use pet_portal::models::{PetDraft, PetFilter};
use pet_portal_core::{AgeMonths, PetId, PetStatus};
use pet_portal_integration_tests::TestContext;

fn draft(name: &str) -> PetDraft {
    PetDraft {
        name: name.to_owned(),
        species: "Rabbit".to_owned(),
        breed: "Holland Lop".to_owned(),
        gender: "Female".to_owned(),
        age_months: AgeMonths::new(8),
        size: "Small".to_owned(),
        energy: "Calm".to_owned(),
        story: "Loves fresh greens.".to_owned(),
        traits: vec![" Quiet ".to_owned(), String::new(), "Litter trained".to_owned()],
        images: vec![
            "a.jpg".to_owned(),
            "  ".to_owned(),
            "b.jpg".to_owned(),
            "c.jpg".to_owned(),
        ],
        ..PetDraft::default()
    }
}

fn ids(pets: &[pet_portal::models::Pet]) -> Vec<&str> {
    pets.iter().map(|pet| pet.id.as_str()).collect()
}

// =============================================================================
// Browsing
// =============================================================================

#[test]
fn test_species_filter_returns_only_that_species() {
    let ctx = TestContext::new();

    let dogs = ctx.portal.list_available_pets(&PetFilter::all().species("dog"));
    assert_eq!(ids(&dogs), ["pet-101", "pet-105"]);
    assert!(dogs.iter().all(|pet| pet.species == "Dog"));

    let all = ctx.portal.list_available_pets(&PetFilter::all().species("all"));
    assert_eq!(all.len(), 4);
}

#[test]
fn test_filters_combine_with_and() {
    let ctx = TestContext::new();

    let filter = PetFilter::all().species("Cat").location("Laketown");
    assert_eq!(ids(&ctx.portal.list_available_pets(&filter)), ["pet-104"]);

    let filter = PetFilter::all().species("Dog").search("collie");
    assert_eq!(ids(&ctx.portal.list_available_pets(&filter)), ["pet-105"]);

    let filter = PetFilter::all().species("Cat").search("collie");
    assert!(ctx.portal.list_available_pets(&filter).is_empty());
}

#[test]
fn test_search_matches_name_breed_and_location() {
    let ctx = TestContext::new();

    let by_name = ctx.portal.list_available_pets(&PetFilter::all().search("MILO"));
    assert_eq!(ids(&by_name), ["pet-101"]);

    let by_location = ctx
        .portal
        .list_available_pets(&PetFilter::all().search("river"));
    assert_eq!(ids(&by_location), ["pet-101", "pet-102"]);
}

#[test]
fn test_get_pet_ignores_status() {
    let ctx = TestContext::new();
    assert!(ctx.portal.get_pet(&PetId::new("pet-101")).is_some());
    assert!(ctx.portal.get_pet(&PetId::new("pet-999")).is_none());
}

// =============================================================================
// Publishing
// =============================================================================

#[test]
fn test_shelter_publishes_pet_with_cleaned_lists() {
    let ctx = TestContext::new();
    let shelter = ctx.green_paws();

    let pet = ctx.portal.shelter_publish_pet(&shelter, draft("Clover")).unwrap();
    assert_eq!(pet.status, PetStatus::Available);
    assert_eq!(pet.shelter_id.as_str(), "shelter-1");
    assert_eq!(pet.location, "Riverdale");
    assert_eq!(pet.traits, ["Quiet", "Litter trained"]);
    assert_eq!(pet.images, ["a.jpg", "b.jpg"]);

    let rabbits = ctx
        .portal
        .list_available_pets(&PetFilter::all().species("Rabbit"));
    assert_eq!(rabbits.len(), 1);

    let mine = ctx.portal.shelter_pets(&shelter).unwrap();
    assert_eq!(mine.len(), 3);
}

#[test]
fn test_shelter_edits_own_pet_but_not_others() {
    let ctx = TestContext::new();
    let shelter = ctx.green_paws();

    let mut edit = draft("Milo");
    edit.id = Some(PetId::new("pet-101"));
    edit.location = "Hillview".to_owned();
    let pet = ctx.portal.shelter_publish_pet(&shelter, edit).unwrap();
    assert_eq!(pet.species, "Rabbit");
    assert_eq!(pet.location, "Hillview");

    let mut foreign = draft("Kiwi");
    foreign.id = Some(PetId::new("pet-105"));
    let err = ctx.portal.shelter_publish_pet(&shelter, foreign).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);
}

#[test]
fn test_publishing_requires_fields_and_shelter_role() {
    let ctx = TestContext::new();
    let shelter = ctx.green_paws();

    let mut missing = draft("Clover");
    missing.breed = "   ".to_owned();
    let err = ctx.portal.shelter_publish_pet(&shelter, missing).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let adopter = ctx.adopter();
    let err = ctx
        .portal
        .shelter_publish_pet(&adopter, draft("Clover"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);
}

#[test]
fn test_reset_pet_catalog_restores_demo_pets() {
    let ctx = TestContext::new();
    let shelter = ctx.green_paws();
    ctx.portal.shelter_publish_pet(&shelter, draft("Clover")).unwrap();

    let seeded = ctx.portal.reset_pet_catalog().unwrap();
    assert_eq!(seeded, 4);
    let pets = ctx.portal.list_available_pets(&PetFilter::all());
    assert_eq!(ids(&pets), ["pet-101", "pet-102", "pet-104", "pet-105"]);
}
