//! Pet listing types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pet_portal_core::{AgeMonths, PetId, PetStatus, ShelterId};

/// Maximum number of images stored per pet.
pub const MAX_IMAGES: usize = 2;

/// Image shown when a pet has no image at the requested position.
pub const PLACEHOLDER_IMAGE: &str = "placeholder-pet.svg";

/// A pet listed by a shelter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    /// Unique pet ID.
    pub id: PetId,
    /// Pet name.
    pub name: String,
    /// Species label (e.g., "Dog", "Cat").
    pub species: String,
    /// Breed label.
    pub breed: String,
    /// Gender label.
    pub gender: String,
    /// Age in months.
    pub age_months: AgeMonths,
    /// Size label (e.g., "Small", "Medium").
    pub size: String,
    /// Coat color.
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub vaccinated: bool,
    #[serde(default)]
    pub neutered: bool,
    /// Energy label (e.g., "Calm", "Playful").
    pub energy: String,
    #[serde(default)]
    pub good_with_kids: bool,
    #[serde(default)]
    pub good_with_pets: bool,
    /// Owning shelter.
    pub shelter_id: ShelterId,
    /// Where the pet can be met.
    pub location: String,
    /// Listing status.
    #[serde(default)]
    pub status: PetStatus,
    /// Free-form description.
    #[serde(default)]
    pub story: String,
    /// Short trait labels, in display order.
    #[serde(default)]
    pub traits: Vec<String>,
    /// Up to [`MAX_IMAGES`] image URIs, in display order.
    #[serde(default)]
    pub images: Vec<String>,
    /// When the listing was first published.
    pub created_at: DateTime<Utc>,
}

impl Pet {
    /// Whether the pet is open for applications.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == PetStatus::Available
    }

    /// The image at `index`, or the placeholder when there is none.
    #[must_use]
    pub fn image_or_placeholder(&self, index: usize) -> &str {
        self.images
            .get(index)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// Lowercased text searched by [`PetFilter::search`].
    fn search_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.name, self.breed, self.species, self.location
        )
        .to_lowercase()
    }
}

/// Pet fields submitted by a shelter when publishing or editing a listing.
///
/// `id` selects the listing to edit; `None` publishes a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
#[serde(rename_all = "camelCase")]
pub struct PetDraft {
    #[serde(default)]
    pub id: Option<PetId>,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub gender: String,
    pub age_months: AgeMonths,
    pub size: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub vaccinated: bool,
    #[serde(default)]
    pub neutered: bool,
    pub energy: String,
    #[serde(default)]
    pub good_with_kids: bool,
    #[serde(default)]
    pub good_with_pets: bool,
    /// Empty means "the shelter's city".
    #[serde(default)]
    pub location: String,
    pub story: String,
    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Adopter-facing catalog filter.
///
/// `None` (or the literal `all`) leaves a dimension unfiltered. Filters are
/// combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetFilter {
    /// Exact species, case-insensitive.
    pub species: Option<String>,
    /// Exact location, case-insensitive.
    pub location: Option<String>,
    /// Substring of name, breed, species or location, case-insensitive.
    pub search: Option<String>,
}

impl PetFilter {
    /// The neutral filter matching every available pet.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to a species.
    #[must_use]
    pub fn species(mut self, species: impl Into<String>) -> Self {
        self.species = Some(species.into());
        self
    }

    /// Restrict to a location.
    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Restrict to pets whose text contains `search`.
    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Whether `pet` passes every active criterion. Status is not checked here.
    #[must_use]
    pub fn matches(&self, pet: &Pet) -> bool {
        if let Some(species) = active(self.species.as_deref())
            && !pet.species.trim().eq_ignore_ascii_case(species)
        {
            return false;
        }

        if let Some(location) = active(self.location.as_deref())
            && !pet.location.trim().eq_ignore_ascii_case(location)
        {
            return false;
        }

        match self.search.as_deref().map(str::trim) {
            Some(search) if !search.is_empty() => {
                pet.search_text().contains(&search.to_lowercase())
            }
            _ => true,
        }
    }
}

/// A criterion is inactive when absent, blank, or the `all` wildcard.
fn active(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}
