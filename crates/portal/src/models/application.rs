//! Adoption application types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pet_portal_core::{ApplicationId, ApplicationStatus, Email, PetId, ShelterId, UserId};

use super::validation::{ValidationError, required};

/// An adopter's application for one pet.
///
/// `pet_name` and `shelter_id` are copied from the pet at submission time so
/// shelters can list their applications without joining against pets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// Unique application ID.
    pub id: ApplicationId,
    /// Pet applied for.
    pub pet_id: PetId,
    /// Pet name at submission time.
    pub pet_name: String,
    /// Shelter owning the pet at submission time.
    pub shelter_id: ShelterId,
    /// Applying adopter.
    pub user_id: UserId,
    /// Current status.
    pub status: ApplicationStatus,
    /// When the application was submitted.
    pub created_at: DateTime<Utc>,
    /// When the shelter decided, if it has.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Applicant details as entered on the form.
    pub applicant: Applicant,
}

/// Applicant details captured with an application.
///
/// A snapshot, not a live reference to the user record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Applicant {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub address: String,
    /// Housing situation (e.g., "House with yard").
    pub housing: String,
    /// Prior pet experience.
    pub experience: String,
    /// Optional note to the shelter.
    #[serde(default)]
    pub message: String,
}

impl Applicant {
    /// Trim every field and check the required ones.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first missing required field or an
    /// invalid email address.
    pub fn validated(&self) -> Result<Self, ValidationError> {
        let email = Email::parse(&self.email)
            .map_err(|e| ValidationError::new("email", e.to_string()))?;

        Ok(Self {
            full_name: required("fullName", &self.full_name)?,
            email: email.into_inner(),
            phone: required("phone", &self.phone)?,
            city: required("city", &self.city)?,
            address: required("address", &self.address)?,
            housing: required("housing", &self.housing)?,
            experience: required("experience", &self.experience)?,
            message: self.message.trim().to_owned(),
        })
    }
}

/// Per-status application counts for a dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationCounts {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl ApplicationCounts {
    /// Tally `applications` by status.
    #[must_use]
    pub fn tally<'a>(applications: impl IntoIterator<Item = &'a Application>) -> Self {
        applications
            .into_iter()
            .fold(Self::default(), |mut counts, application| {
                counts.total += 1;
                match application.status {
                    ApplicationStatus::Pending => counts.pending += 1,
                    ApplicationStatus::Approved => counts.approved += 1,
                    ApplicationStatus::Rejected => counts.rejected += 1,
                }
                counts
            })
    }
}
