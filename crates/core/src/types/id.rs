//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. IDs are opaque
//! strings; freshly generated ones take the form `<prefix>-<hex>`.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `generate()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>`, `AsRef<str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use pet_portal_core::define_id;
/// define_id!(UserId, "user");
/// define_id!(PetId, "pet");
///
/// let user_id = UserId::new("user-1");
/// let pet_id = PetId::generate();
/// assert!(pet_id.as_str().starts_with("pet-"));
///
/// // These are different types, so this won't compile:
/// // let _: UserId = pet_id;
/// # let _ = user_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Prefix used for freshly generated IDs.
            pub const PREFIX: &'static str = $prefix;

            /// Wrap an existing ID value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a fresh, random ID (`<prefix>-<hex>`).
            #[must_use]
            pub fn generate() -> Self {
                Self(format!("{}-{}", $prefix, ::uuid::Uuid::new_v4().simple()))
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(UserId, "user");
define_id!(ShelterId, "shelter");
define_id!(PetId, "pet");
define_id!(ApplicationId, "app");

// The session record carries whichever account logged in.
define_id!(AccountId, "account");

impl From<UserId> for AccountId {
    fn from(id: UserId) -> Self {
        Self(id.into_inner())
    }
}

impl From<ShelterId> for AccountId {
    fn from(id: ShelterId) -> Self {
        Self(id.into_inner())
    }
}

impl AccountId {
    /// Reinterpret this account ID as a user ID.
    #[must_use]
    pub fn to_user_id(&self) -> UserId {
        UserId::new(self.0.clone())
    }

    /// Reinterpret this account ID as a shelter ID.
    #[must_use]
    pub fn to_shelter_id(&self) -> ShelterId {
        ShelterId::new(self.0.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_uses_prefix() {
        let id = ApplicationId::generate();
        assert!(id.as_str().starts_with("app-"));
        assert!(id.as_str().len() > "app-".len());
    }

    #[test]
    fn test_generate_is_unique() {
        assert_ne!(PetId::generate(), PetId::generate());
    }

    #[test]
    fn test_serde_transparent() {
        let id = ShelterId::new("shelter-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"shelter-1\"");

        let parsed: ShelterId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_account_id_conversions() {
        let account = AccountId::from(ShelterId::new("shelter-2"));
        assert_eq!(account.to_shelter_id(), ShelterId::new("shelter-2"));
        assert_eq!(account.to_user_id().as_str(), "shelter-2");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", UserId::new("user-1")), "user-1");
    }
}
