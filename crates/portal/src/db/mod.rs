//! Repositories over the portal's key-value store.
//!
//! # Collections
//!
//! - `pap_users` - Adopter accounts
//! - `pap_shelters` - Shelter accounts
//! - `pap_pets` - Pet catalog
//! - `pap_applications` - Adoption applications
//!
//! # Consistency
//!
//! Every write loads the whole collection, changes one entity and writes the
//! whole collection back. Stored records that no longer decode are skipped on
//! read and written back untouched. A single call is atomic only with respect
//! to itself: two processes interleaving read-modify-write cycles on the same
//! collection lose one of the updates (last write wins). No locking is attempted; the
//! store is local to one process at a time in normal use.

pub mod applications;
pub mod pets;
pub mod shelters;
pub mod users;

use std::fmt::Display;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::error::ErrorKind;
use crate::models::{Administrator, Shelter, User, ValidationError};
use crate::store::{StorageError, Store};

pub use applications::ApplicationRepository;
pub use pets::PetRepository;
pub use shelters::ShelterRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Storage write failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Requested entity was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Constraint violation (e.g., unique email, duplicate id).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Entity failed validation.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}

impl RepositoryError {
    /// Taxonomy entry for this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Storage(_) => ErrorKind::StorageUnavailable,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Duplicate,
            Self::Validation(_) => ErrorKind::Validation,
        }
    }
}

/// A persisted entity stored as one element of a keyed collection.
pub(crate) trait Record: Clone + Serialize + DeserializeOwned {
    /// Storage key of the collection.
    const KEY: &'static str;
    /// Entity name used in error messages.
    const NAME: &'static str;

    type Id: PartialEq + Display;

    fn id(&self) -> &Self::Id;
}

/// Whole-collection read-modify-write helper shared by the repositories.
///
/// Reads decode each element separately and skip the ones that fail, so one
/// bad record does not hide the rest. Writes operate on the raw elements and
/// only re-encode the entity being written; records that do not decode are
/// carried over verbatim instead of being dropped.
pub(crate) struct Collection<'a, T> {
    store: &'a Store,
    _record: PhantomData<T>,
}

impl<'a, T: Record> Collection<'a, T> {
    pub(crate) const fn new(store: &'a Store) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// Every decodable entity, in stored order. Unreadable data yields an empty list.
    pub(crate) fn load(&self) -> Vec<T> {
        match self.store.load_json(T::KEY) {
            Ok(Some(Value::Array(items))) => items
                .iter()
                .enumerate()
                .filter_map(|(index, raw)| match decode::<T>(raw) {
                    Ok(item) => Some(item),
                    Err(e) => {
                        warn!(key = T::KEY, index, error = %e, "Skipping undecodable record");
                        None
                    }
                })
                .collect(),
            Ok(None) => Vec::new(),
            Ok(Some(_)) => {
                warn!(key = T::KEY, "Collection is not a list, reading it as empty");
                Vec::new()
            }
            Err(e) => {
                warn!(key = T::KEY, error = %e, "Collection unreadable, reading it as empty");
                Vec::new()
            }
        }
    }

    pub(crate) fn find(&self, id: &T::Id) -> Option<T> {
        self.load().into_iter().find(|item| item.id() == id)
    }

    /// Raw elements to modify. Refuses values that are not a list.
    fn load_for_write(&self) -> Result<Vec<Value>, RepositoryError> {
        match self.store.load_json(T::KEY)? {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(StorageError::Malformed {
                key: T::KEY.to_owned(),
                reason: "expected a list".to_owned(),
            }
            .into()),
        }
    }

    fn write(&self, items: &[Value]) -> Result<(), RepositoryError> {
        self.store.save(T::KEY, items)?;
        Ok(())
    }

    /// Append `item`, rejecting a duplicate id.
    pub(crate) fn insert(&self, item: T) -> Result<T, RepositoryError> {
        let mut items = self.load_for_write()?;
        if items.iter().any(|raw| holds::<T>(raw, item.id())) {
            return Err(RepositoryError::Conflict(format!(
                "{} {} already exists",
                T::NAME,
                item.id()
            )));
        }
        items.push(encode(&item)?);
        self.write(&items)?;
        Ok(item)
    }

    /// Replace the entity with the same id.
    pub(crate) fn replace(&self, item: T) -> Result<T, RepositoryError> {
        let mut items = self.load_for_write()?;
        let slot = items
            .iter_mut()
            .find(|raw| holds::<T>(raw, item.id()))
            .ok_or_else(|| RepositoryError::NotFound(format!("{} {}", T::NAME, item.id())))?;
        *slot = encode(&item)?;
        self.write(&items)?;
        Ok(item)
    }

    /// The stored value verbatim, for undoing a multi-step write.
    pub(crate) fn snapshot(&self) -> Result<Option<String>, RepositoryError> {
        Ok(self.store.backend().get(T::KEY)?)
    }

    /// Put back a value taken with [`Self::snapshot`].
    pub(crate) fn restore(&self, snapshot: Option<&str>) -> Result<(), RepositoryError> {
        match snapshot {
            Some(raw) => self.store.backend().set(T::KEY, raw)?,
            None => self.store.backend().remove(T::KEY)?,
        }
        Ok(())
    }

    pub(crate) fn clear(&self) -> Result<(), RepositoryError> {
        self.store.remove(T::KEY)?;
        Ok(())
    }
}

fn decode<T: Record>(raw: &Value) -> Result<T, serde_json::Error> {
    <T as Deserialize>::deserialize(raw)
}

/// Whether `raw` decodes to the entity with `id`.
fn holds<T: Record>(raw: &Value, id: &T::Id) -> bool {
    decode::<T>(raw).is_ok_and(|existing| existing.id() == id)
}

fn encode<T: Record>(item: &T) -> Result<Value, RepositoryError> {
    serde_json::to_value(item).map_err(|source| {
        StorageError::Serialize {
            key: T::KEY.to_owned(),
            source,
        }
        .into()
    })
}

/// Whether `email` already resolves to any account (administrator, user or shelter).
pub(crate) fn email_in_use(store: &Store, email: &str) -> bool {
    Administrator::platform().email.matches(email)
        || Collection::<User>::new(store)
            .load()
            .iter()
            .any(|user| user.email.matches(email))
        || Collection::<Shelter>::new(store)
            .load()
            .iter()
            .any(|shelter| shelter.email.matches(email))
}
