//! Shelter account type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pet_portal_core::{Email, Password, ShelterId, ShelterState};

/// A rescue shelter that lists pets and decides applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shelter {
    /// Unique shelter ID.
    pub id: ShelterId,
    /// Shelter name.
    pub name: String,
    /// Login email (unique across all accounts, case-insensitive).
    pub email: Email,
    /// Plain-text demo password.
    pub password: Password,
    /// Contact phone number.
    #[serde(default)]
    pub phone: String,
    /// City the shelter operates in; default location for new pets.
    #[serde(default)]
    pub city: String,
    /// Approved by the administrator.
    #[serde(default)]
    pub approved: bool,
    /// Blocked by the administrator.
    #[serde(default)]
    pub blocked: bool,
    /// When the shelter registered.
    pub created_at: DateTime<Utc>,
}

impl Shelter {
    /// Current moderation state.
    #[must_use]
    pub const fn state(&self) -> ShelterState {
        ShelterState::from_flags(self.approved, self.blocked)
    }

    /// Whether this shelter may log in.
    #[must_use]
    pub const fn can_authenticate(&self) -> bool {
        matches!(self.state(), ShelterState::Approved)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn shelter(approved: bool, blocked: bool) -> Shelter {
        Shelter {
            id: ShelterId::new("shelter-9"),
            name: "Test Shelter".to_owned(),
            email: Email::parse("test@shelter.org").unwrap(),
            password: Password::from_stored("Shelter@123"),
            phone: String::new(),
            city: "Riverdale".to_owned(),
            approved,
            blocked,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_blocked_shelter_cannot_authenticate() {
        assert!(!shelter(true, true).can_authenticate());
        assert_eq!(shelter(true, true).state(), ShelterState::Blocked);
    }

    #[test]
    fn test_approval_required() {
        assert!(!shelter(false, false).can_authenticate());
        assert!(shelter(true, false).can_authenticate());
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let json = serde_json::to_value(shelter(true, false)).unwrap();
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["approved"], true);
    }

    #[test]
    fn test_missing_flags_default_false() {
        let json = r#"{
            "id": "shelter-3",
            "name": "Legacy",
            "email": "legacy@shelter.org",
            "password": "x",
            "createdAt": "2024-05-01T10:00:00.000Z"
        }"#;
        let parsed: Shelter = serde_json::from_str(json).unwrap();
        assert!(!parsed.approved);
        assert!(!parsed.blocked);
        assert_eq!(parsed.state(), ShelterState::Unapproved);
    }
}
