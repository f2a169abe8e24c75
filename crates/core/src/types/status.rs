//! Status and role enums for the portal's entities.

use serde::{Deserialize, Serialize};

/// Availability of a pet listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PetStatus {
    /// Listed and open for applications.
    #[default]
    Available,
    /// Adopted through an approved application.
    Adopted,
}

impl std::fmt::Display for PetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::Adopted => write!(f, "adopted"),
        }
    }
}

/// Adoption application status.
///
/// `Pending` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    /// Whether no further transition is allowed.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// A shelter's decision on a pending application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    /// The application status this decision moves to.
    #[must_use]
    pub const fn target_status(self) -> ApplicationStatus {
        match self {
            Self::Approve => ApplicationStatus::Approved,
            Self::Reject => ApplicationStatus::Rejected,
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Approve => write!(f, "approve"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// Account role, also used as the account-type discriminator.
///
/// Adopters are stored with the `user` role name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// An adopter.
    User,
    /// A rescue shelter listing pets.
    Shelter,
    /// The platform administrator.
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Shelter => write!(f, "shelter"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" | "adopter" => Ok(Self::User),
            "shelter" => Ok(Self::Shelter),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

/// Derived moderation state of a shelter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShelterState {
    /// Registered, waiting for administrator approval.
    Unapproved,
    /// May log in and publish pets.
    Approved,
    /// Blocked by the administrator (implies not approved).
    Blocked,
}

impl ShelterState {
    /// Derive the state from the stored flags. `blocked` wins over `approved`.
    #[must_use]
    pub const fn from_flags(approved: bool, blocked: bool) -> Self {
        match (approved, blocked) {
            (_, true) => Self::Blocked,
            (true, false) => Self::Approved,
            (false, false) => Self::Unapproved,
        }
    }
}

impl std::fmt::Display for ShelterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unapproved => write!(f, "unapproved"),
            Self::Approved => write!(f, "approved"),
            Self::Blocked => write!(f, "blocked"),
        }
    }
}
