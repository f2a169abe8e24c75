//! Session-related types.
//!
//! The session record is persisted under [`crate::store::keys::AUTH`] and
//! identifies the logged-in account until it is explicitly cleared.

use serde::{Deserialize, Serialize};

use pet_portal_core::{AccountId, Email, Role};

/// Session-stored account identity.
///
/// Minimal data stored in the session to identify the logged-in account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Account ID (user, shelter or administrator).
    pub id: AccountId,
    /// Account role.
    pub role: Role,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: Email,
}

impl Session {
    /// Whether this session belongs to the account with `id`.
    #[must_use]
    pub fn is_account(&self, id: impl AsRef<str>) -> bool {
        self.id.as_str() == id.as_ref()
    }
}
