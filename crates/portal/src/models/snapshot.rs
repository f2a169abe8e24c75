//! Export and summary report types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::application::Application;
use super::pet::Pet;
use super::shelter::Shelter;
use super::user::User;

/// Full dump of every persisted collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// When the snapshot was taken.
    pub exported_at: DateTime<Utc>,
    pub users: Vec<User>,
    pub shelters: Vec<Shelter>,
    pub pets: Vec<Pet>,
    pub applications: Vec<Application>,
}

/// Headline numbers for the landing page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalStats {
    /// Pets open for applications.
    pub available_pets: usize,
    /// Applications of any status.
    pub total_applications: usize,
    /// Shelters currently approved.
    pub verified_shelters: usize,
    /// Pets marked adopted.
    pub adoptions: usize,
}
