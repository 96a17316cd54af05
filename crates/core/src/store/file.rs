//! File-backed storage: one JSON document per key.

use std::fs;
use std::io;
use std::path::PathBuf;

use super::{StateStore, StoreError};

/// [`StateStore`] keeping each key in its own file under a namespace
/// directory.
///
/// The directory is created on open. Key names map to file names with a
/// `.json` suffix; characters outside `[A-Za-z0-9_-]` are replaced so keys
/// cannot escape the directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open (creating if needed) the namespace directory.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// The namespace directory.
    #[must_use]
    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

impl StateStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_owned(),
                source,
            }),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::write(self.path_for(key), value).map_err(|source| StoreError::Io {
            key: key.to_owned(),
            source,
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io {
                key: key.to_owned(),
                source,
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::keys;

    #[test]
    fn test_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();

        assert_eq!(store.load(keys::CART).unwrap(), None);
        store.save(keys::CART, "[]").unwrap();
        assert_eq!(store.load(keys::CART).unwrap().as_deref(), Some("[]"));

        // A second store over the same directory sees the value.
        let reopened = JsonFileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.load(keys::CART).unwrap().as_deref(), Some("[]"));

        store.remove(keys::CART).unwrap();
        assert_eq!(store.load(keys::CART).unwrap(), None);
    }

    #[test]
    fn test_keys_cannot_escape_namespace() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        store.save("../outside", "x").unwrap();
        assert!(dir.path().join("___outside.json").exists());
        assert_eq!(store.load("../outside").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_open_creates_nested_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("state").join("shop");
        let store = JsonFileStore::open(&nested).unwrap();
        store.save("k", "v").unwrap();
        assert!(nested.join("k.json").exists());
    }
}
