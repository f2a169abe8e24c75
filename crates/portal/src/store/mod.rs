//! Persistent key-value storage for portal state.
//!
//! # Layout
//!
//! Portal state lives under five independent keys (see [`keys`]). Each value
//! is a JSON document holding either the session record or a whole entity
//! collection.
//!
//! # Media
//!
//! - [`MemoryStore`] - process-local map, used by tests and as the degraded
//!   fallback when the file medium cannot be opened
//! - [`FileStore`] - one JSON file per key inside a data directory
//!
//! # Consistency
//!
//! The medium offers no transactions. Reads never fail: a missing, unreadable
//! or malformed value resolves to the caller's fallback. Writes replace the
//! whole value and are last-write-wins across processes.

mod file;
mod memory;

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage keys for portal state.
pub mod keys {
    /// Key for the current session record.
    pub const AUTH: &str = "pap_auth";

    /// Key for the adopter collection.
    pub const USERS: &str = "pap_users";

    /// Key for the shelter collection.
    pub const SHELTERS: &str = "pap_shelters";

    /// Key for the pet catalog.
    pub const PETS: &str = "pap_pets";

    /// Key for the adoption application collection.
    pub const APPLICATIONS: &str = "pap_applications";

    /// Every key owned by the portal.
    pub const ALL: [&str; 5] = [AUTH, USERS, SHELTERS, PETS, APPLICATIONS];
}

/// Errors raised by the storage medium.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The key contains characters the medium cannot address.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Reading or writing the medium failed.
    #[error("storage I/O failed during {operation}: {source}")]
    Io {
        /// What the store was doing.
        operation: &'static str,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The value could not be serialized.
    #[error("failed to serialize value for {key}: {source}")]
    Serialize {
        /// Key being written.
        key: String,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// The stored value is not JSON of the shape its key holds.
    #[error("malformed value under {key}: {reason}")]
    Malformed {
        /// Key being read.
        key: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The medium is not usable at all.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A raw key-value medium holding JSON text.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value under `key`, `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the raw value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the medium cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value under `key`. Succeeds when the key is absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the medium cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Whether values survive a process restart.
    fn is_persistent(&self) -> bool;
}

/// Typed access to a [`KeyValueStore`].
///
/// Injected by reference into every repository and service.
pub struct Store {
    backend: Box<dyn KeyValueStore>,
}

impl Store {
    /// Wrap a storage medium.
    #[must_use]
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Create a store backed by a fresh in-memory map.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Open a file-backed store in `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub fn open_dir(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        Ok(Self::new(FileStore::open(dir)?))
    }

    /// Open a file-backed store, degrading to memory if the medium is unusable.
    #[must_use]
    pub fn open_or_memory(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        match Self::open_dir(dir) {
            Ok(store) => store,
            Err(e) => {
                warn!(
                    dir = %dir.display(),
                    error = %e,
                    "Persistent storage unavailable, falling back to in-memory store"
                );
                Self::in_memory()
            }
        }
    }

    /// Access the raw medium.
    #[must_use]
    pub fn backend(&self) -> &dyn KeyValueStore {
        self.backend.as_ref()
    }

    /// Whether values survive a process restart.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.backend.is_persistent()
    }

    /// Load the value under `key`, or `fallback` if absent, unreadable or malformed.
    pub fn load<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key, "Key absent, using fallback");
                return fallback;
            }
            Err(e) => {
                warn!(key, error = %e, "Failed to read key, using fallback");
                return fallback;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Malformed value, using fallback");
                fallback
            }
        }
    }

    /// Parse the raw value under `key` as untyped JSON, `None` when absent.
    ///
    /// Unlike [`Self::load`] this reports failures, so callers that are about
    /// to overwrite a value can tell "nothing stored" from "unreadable".
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Malformed` if the value is not JSON.
    /// Returns `StorageError` if the medium cannot be read.
    pub fn load_json(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
        let Some(raw) = self.backend.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::Malformed {
                key: key.to_owned(),
                reason: e.to_string(),
            })
    }

    /// Serialize `value` and store it under `key`, replacing any prior value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if serialization or the write fails.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
            key: key.to_owned(),
            source,
        })?;
        self.backend.set(key, &raw)
    }

    /// Delete the value under `key`. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the medium cannot be written.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.backend.remove(key)
    }

    /// Remove every portal key, returning the store to its empty state.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if any key cannot be removed.
    pub fn reset(&self) -> Result<(), StorageError> {
        for key in keys::ALL {
            self.backend.remove(key)?;
        }
        debug!("Store reset");
        Ok(())
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("persistent", &self.backend.is_persistent())
            .finish()
    }
}

/// Reject keys that could escape the medium's namespace.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        tags: Vec<String>,
    }

    #[test]
    fn test_save_then_load() {
        let store = Store::in_memory();
        let value = Sample {
            name: "Milo".to_owned(),
            tags: vec!["dog".to_owned()],
        };

        store.save("sample", &value).unwrap();

        let loaded: Sample = store.load(
            "sample",
            Sample {
                name: String::new(),
                tags: vec![],
            },
        );
        assert_eq!(loaded, value);
    }

    #[test]
    fn test_load_unknown_key_returns_fallback() {
        let store = Store::in_memory();
        let loaded: Vec<u32> = store.load("missing", vec![7]);
        assert_eq!(loaded, vec![7]);
    }

    #[test]
    fn test_load_malformed_returns_fallback() {
        let store = Store::in_memory();
        store.backend().set("broken", "{not json").unwrap();

        let loaded: Vec<u32> = store.load("broken", vec![]);
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_load_wrong_shape_returns_fallback() {
        let store = Store::in_memory();
        store.save("shape", &serde_json::json!({"a": 1})).unwrap();

        let loaded: Vec<u32> = store.load("shape", vec![1, 2]);
        assert_eq!(loaded, vec![1, 2]);
    }

    #[test]
    fn test_load_json_reports_malformed() {
        let store = Store::in_memory();
        assert!(store.load_json("missing").unwrap().is_none());

        store.backend().set("broken", "{not json").unwrap();
        assert!(matches!(
            store.load_json("broken"),
            Err(StorageError::Malformed { key, .. }) if key == "broken"
        ));

        store.save("list", &[1, 2]).unwrap();
        assert_eq!(
            store.load_json("list").unwrap(),
            Some(serde_json::json!([1, 2]))
        );
    }

    #[test]
    fn test_remove_is_idempotent() {
        let store = Store::in_memory();
        store.save("k", &1).unwrap();
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.load("k", 0), 0);
    }

    #[test]
    fn test_reset_clears_portal_keys() {
        let store = Store::in_memory();
        for key in keys::ALL {
            store.save(key, &[1]).unwrap();
        }
        store.save("unrelated", &true).unwrap();

        store.reset().unwrap();

        for key in keys::ALL {
            assert!(store.backend().get(key).unwrap().is_none());
        }
        assert!(store.load("unrelated", false));
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("pap_users").is_ok());
        assert!(validate_key("a-b_C9").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc").is_err());
        assert!(validate_key("a/b").is_err());
    }

    #[test]
    fn test_open_or_memory_degrades() {
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"file").unwrap();

        let store = Store::open_or_memory(blocker.join("data"));
        assert!(!store.is_persistent());
        store.save("k", &5).unwrap();
        assert_eq!(store.load("k", 0), 5);
    }
}
