//! File-backed storage medium.
//!
//! Each key is stored as `<dir>/<key>.json`. Writes go to a temp file first
//! and are renamed into place, so a crash never leaves a half-written value.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{KeyValueStore, StorageError, validate_key};

/// A directory of JSON files, one per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) the data directory.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            operation: "create_data_dir",
            source,
        })?;
        debug!(dir = %dir.display(), "Opened file store");
        Ok(Self { dir })
    }

    /// The data directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                operation: "read_value",
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let temp_path = path.with_extension("json.tmp");

        fs::write(&temp_path, value).map_err(|source| StorageError::Io {
            operation: "write_temp_value",
            source,
        })?;
        fs::rename(&temp_path, &path).map_err(|source| StorageError::Io {
            operation: "rename_temp_value",
            source,
        })?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                operation: "remove_value",
                source,
            }),
        }
    }

    fn is_persistent(&self) -> bool {
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::store::Store;

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();

        let store = Store::open_dir(temp_dir.path()).unwrap();
        store.save("pap_pets", &vec!["pet-101"]).unwrap();
        drop(store);

        let reopened = Store::open_dir(temp_dir.path()).unwrap();
        let pets: Vec<String> = reopened.load("pap_pets", vec![]);
        assert_eq!(pets, vec!["pet-101".to_owned()]);
    }

    #[test]
    fn test_creates_nested_dir() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("a").join("b");

        let store = FileStore::open(&dir).unwrap();
        store.set("k", "1").unwrap();

        assert!(dir.join("k.json").exists());
    }

    #[test]
    fn test_no_tmp_files_after_write() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();

        store.set("k", "clean").unwrap();

        let tmp_count = fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(tmp_count, 0);
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();
        store.remove("never-written").unwrap();
        assert!(store.get("never-written").unwrap().is_none());
    }

    #[test]
    fn test_rejects_path_traversal() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();
        assert!(matches!(
            store.set("../escape", "1"),
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_corrupt_file_loads_fallback() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("pap_users.json"), "][").unwrap();

        let store = Store::open_dir(temp_dir.path()).unwrap();
        let users: Vec<String> = store.load("pap_users", vec![]);
        assert!(users.is_empty());
    }
}
