//! Key-value snapshot persistence.
//!
//! Collections are stored as string-serialized JSON under well-known keys,
//! the way the browser build kept them in local storage. The store is
//! synchronous and per-namespace; two sessions pointed at the same namespace
//! race last-writer-wins, and nothing reconciles concurrent writers.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Storage keys shared by the storefront and admin components.
pub mod keys {
    /// Favourite dish titles.
    pub const FAVOURITES: &str = "nutriplanner-favourites";
    /// Cart lines.
    pub const CART: &str = "nutriplanner-cartItems";
    /// Placed order lines.
    pub const ORDERS: &str = "nutriplanner-orders";
    /// Admin-managed dish collection.
    pub const DISHES: &str = "nutriplanner-dishes";
    /// Count of cancelled lines that were already being prepared.
    pub const TOTAL_RETURNS: &str = "nutriplanner-totalReturns";
}

/// Errors raised by a [`StateStore`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend could not read or write the underlying medium.
    #[error("storage I/O for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// String key-value storage for serialized snapshots.
///
/// Implementations stand in for the browser's local storage: synchronous,
/// whole-value writes, no cross-session coordination.
pub trait StateStore: Send + Sync {
    /// Fetch the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend cannot be written.
    fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key` if present.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Decode the snapshot under `key`, falling back to the default when the key
/// is missing, unreadable, or holds something that no longer parses.
pub fn load_or_default<T>(store: &dyn StateStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let raw = match store.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(error) => {
            tracing::warn!(key, %error, "failed to read snapshot, starting empty");
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(key, %error, "snapshot did not parse, starting empty");
            T::default()
        }
    }
}

/// Serialize `value` and store it under `key`.
///
/// Failures are logged, not returned: the in-memory mutation already
/// happened, and mutation outcomes never depend on the storage medium.
pub fn persist<T>(store: &dyn StateStore, key: &str, value: &T)
where
    T: Serialize + ?Sized,
{
    match serde_json::to_string(value) {
        Ok(raw) => {
            if let Err(error) = store.save(key, &raw) {
                tracing::error!(key, %error, "failed to persist snapshot");
            }
        }
        Err(error) => {
            tracing::error!(key, %error, "failed to serialize snapshot");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_load_or_default_on_missing_key() {
        let store = MemoryStore::new();
        let titles: Vec<String> = load_or_default(&store, keys::FAVOURITES);
        assert!(titles.is_empty());
    }

    #[test]
    fn test_load_or_default_on_corrupt_value() {
        let store = MemoryStore::new();
        store.save(keys::FAVOURITES, "{not json").unwrap();
        let titles: Vec<String> = load_or_default(&store, keys::FAVOURITES);
        assert!(titles.is_empty());
    }

    #[test]
    fn test_persist_round_trip() {
        let store = MemoryStore::new();
        persist(&store, keys::FAVOURITES, &vec!["Pasta".to_owned()]);
        let titles: Vec<String> = load_or_default(&store, keys::FAVOURITES);
        assert_eq!(titles, vec!["Pasta"]);
    }

    #[test]
    fn test_counter_round_trip() {
        let store = MemoryStore::new();
        persist(&store, keys::TOTAL_RETURNS, &3_u64);
        let returns: u64 = load_or_default(&store, keys::TOTAL_RETURNS);
        assert_eq!(returns, 3);
    }
}
