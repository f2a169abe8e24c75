//! Catalog commands.

use clap::Args;
use tracing::info;

use pet_portal::Portal;
use pet_portal::models::{Pet, PetDraft, PetFilter};
use pet_portal_core::{AgeMonths, PetId, Role};

use super::CliError;

/// Catalog filters.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Species (e.g., Dog, Cat), or `all`
    #[arg(long)]
    pub species: Option<String>,

    /// Location, or `all`
    #[arg(long)]
    pub location: Option<String>,

    /// Text searched in name, breed, species and location
    #[arg(short, long)]
    pub search: Option<String>,
}

impl From<ListArgs> for PetFilter {
    fn from(args: ListArgs) -> Self {
        Self {
            species: args.species,
            location: args.location,
            search: args.search,
        }
    }
}

/// Pet listing fields.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct PublishArgs {
    /// Edit the pet with this ID instead of publishing a new one
    #[arg(long)]
    pub id: Option<String>,

    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub species: String,

    #[arg(long)]
    pub breed: String,

    #[arg(long)]
    pub gender: String,

    /// Age in months
    #[arg(long)]
    pub age_months: u32,

    #[arg(long)]
    pub size: String,

    #[arg(long, default_value = "")]
    pub color: String,

    #[arg(long)]
    pub vaccinated: bool,

    #[arg(long)]
    pub neutered: bool,

    /// Energy level (e.g., Calm, Playful)
    #[arg(long)]
    pub energy: String,

    #[arg(long)]
    pub good_with_kids: bool,

    #[arg(long)]
    pub good_with_pets: bool,

    /// Defaults to the shelter's city
    #[arg(long, default_value = "")]
    pub location: String,

    #[arg(long)]
    pub story: String,

    /// Trait label (repeatable)
    #[arg(long = "trait")]
    pub traits: Vec<String>,

    /// Image URL (repeatable, first two kept)
    #[arg(long = "image")]
    pub images: Vec<String>,
}

impl From<PublishArgs> for PetDraft {
    fn from(args: PublishArgs) -> Self {
        Self {
            id: args.id.map(PetId::new),
            name: args.name,
            species: args.species,
            breed: args.breed,
            gender: args.gender,
            age_months: AgeMonths::new(args.age_months),
            size: args.size,
            color: args.color,
            vaccinated: args.vaccinated,
            neutered: args.neutered,
            energy: args.energy,
            good_with_kids: args.good_with_kids,
            good_with_pets: args.good_with_pets,
            location: args.location,
            story: args.story,
            traits: args.traits,
            images: args.images,
        }
    }
}

fn log_summary(pet: &Pet) {
    info!(
        id = %pet.id,
        name = %pet.name,
        species = %pet.species,
        breed = %pet.breed,
        age = %pet.age_months.label(),
        location = %pet.location,
        status = %pet.status,
        "Pet"
    );
}

/// List available pets.
pub fn list(portal: &Portal, args: ListArgs) {
    let pets = portal.list_available_pets(&args.into());
    for pet in &pets {
        log_summary(pet);
    }
    info!(count = pets.len(), "Available pets");
}

/// Show every field of one pet.
///
/// # Errors
///
/// Returns `CliError::NotFound` if no pet has this ID.
pub fn show(portal: &Portal, id: &str) -> Result<(), CliError> {
    let pet = portal
        .get_pet(&PetId::new(id))
        .ok_or_else(|| CliError::NotFound(format!("pet {id}")))?;

    log_summary(&pet);
    info!(
        gender = %pet.gender,
        size = %pet.size,
        color = %pet.color,
        energy = %pet.energy,
        vaccinated = pet.vaccinated,
        neutered = pet.neutered,
        good_with_kids = pet.good_with_kids,
        good_with_pets = pet.good_with_pets,
        shelter_id = %pet.shelter_id,
        "Details"
    );
    info!(traits = ?pet.traits, "{}", pet.story);
    info!(
        primary = %pet.image_or_placeholder(0),
        secondary = %pet.image_or_placeholder(1),
        "Images"
    );
    Ok(())
}

/// List every pet of the logged-in shelter.
///
/// # Errors
///
/// Returns an error unless a shelter is logged in.
pub fn mine(portal: &Portal) -> Result<(), CliError> {
    let session = portal.require_session(&[Role::Shelter])?;
    let pets = portal.shelter_pets(&session)?;
    for pet in &pets {
        log_summary(pet);
    }
    info!(count = pets.len(), "Shelter pets");
    Ok(())
}

/// Publish or edit a pet as the logged-in shelter.
///
/// # Errors
///
/// Returns an error unless a shelter is logged in, or if validation fails.
pub fn publish(portal: &Portal, args: PublishArgs) -> Result<(), CliError> {
    let session = portal.require_session(&[Role::Shelter])?;
    let pet = portal.shelter_publish_pet(&session, args.into())?;
    log_summary(&pet);
    info!(id = %pet.id, "Pet saved");
    Ok(())
}
