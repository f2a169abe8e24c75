//! Unified account view across administrator, adopters and shelters.

use serde::{Deserialize, Serialize};

use pet_portal_core::{AccountId, Email, Password, Role};

use super::session::Session;
use super::shelter::Shelter;
use super::user::User;

/// The single platform administrator. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Administrator {
    pub id: AccountId,
    pub name: String,
    pub email: Email,
    pub password: Password,
}

impl Administrator {
    /// Administrator account ID.
    pub const ID: &'static str = "admin-1";
    /// Administrator display name.
    pub const NAME: &'static str = "Platform Admin";
    /// Administrator login email.
    pub const EMAIL: &'static str = "admin@petportal.org";
    /// Administrator demo password.
    pub const PASSWORD: &'static str = "Admin@123";

    /// The built-in administrator record.
    #[must_use]
    pub fn platform() -> Self {
        Self {
            id: AccountId::new(Self::ID),
            name: Self::NAME.to_owned(),
            email: Email::from_stored(Self::EMAIL),
            password: Password::from_stored(Self::PASSWORD),
        }
    }
}

/// Any account that can log in, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Account {
    Admin(Administrator),
    User(User),
    Shelter(Shelter),
}

impl Account {
    /// The account-type discriminator (doubles as the session role).
    #[must_use]
    pub const fn account_type(&self) -> Role {
        match self {
            Self::Admin(_) => Role::Admin,
            Self::User(_) => Role::User,
            Self::Shelter(_) => Role::Shelter,
        }
    }

    #[must_use]
    pub fn id(&self) -> AccountId {
        match self {
            Self::Admin(admin) => admin.id.clone(),
            Self::User(user) => user.id.clone().into(),
            Self::Shelter(shelter) => shelter.id.clone().into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Admin(admin) => &admin.name,
            Self::User(user) => &user.name,
            Self::Shelter(shelter) => &shelter.name,
        }
    }

    #[must_use]
    pub const fn email(&self) -> &Email {
        match self {
            Self::Admin(admin) => &admin.email,
            Self::User(user) => &user.email,
            Self::Shelter(shelter) => &shelter.email,
        }
    }

    #[must_use]
    pub const fn password(&self) -> &Password {
        match self {
            Self::Admin(admin) => &admin.password,
            Self::User(user) => &user.password,
            Self::Shelter(shelter) => &shelter.password,
        }
    }

    /// Whether the administrator has blocked this account.
    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        match self {
            Self::Admin(_) => false,
            Self::User(user) => user.blocked,
            Self::Shelter(shelter) => shelter.blocked,
        }
    }

    /// The minimal session record for this account.
    #[must_use]
    pub fn to_session(&self) -> Session {
        Session {
            id: self.id(),
            role: self.account_type(),
            name: self.name().to_owned(),
            email: self.email().clone(),
        }
    }
}

/// Which kind of account a registration creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationKind {
    User,
    Shelter,
}

/// Registration form fields, shared by adopters and shelters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub kind: RegistrationKind,
    pub name: String,
    pub email: String,
    /// Raw password as typed; validated for strength.
    pub password: String,
    pub phone: String,
    pub city: String,
}
