//! Adopter account type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pet_portal_core::{Email, Password, UserId};

/// A registered adopter.
///
/// Created at registration, afterwards only the `blocked` flag changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email (unique across all accounts, case-insensitive).
    pub email: Email,
    /// Plain-text demo password.
    pub password: Password,
    /// Contact phone number.
    #[serde(default)]
    pub phone: String,
    /// Home city.
    #[serde(default)]
    pub city: String,
    /// Whether the administrator has blocked this account.
    #[serde(default)]
    pub blocked: bool,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}
