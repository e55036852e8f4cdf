//! Durable Key-Value Storage
//!
//! The store writes favorites through to a small key-value backend that
//! outlives the process, the server-side stand-in for browser local storage.
//!
//! - **file**: one JSON document per key inside a data directory
//! - **memory**: process-local map, used in tests and `backend = "memory"`
//! - **error**: error types
//!
//! Values are opaque strings. Callers decide the encoding; favorites are
//! stored as the JSON object of the favorites map under [`FAVORITES_KEY`].

pub mod error;
pub mod file;
pub mod memory;

pub use error::{PersistenceError, PersistenceResult};
pub use file::FileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use crate::config::{StorageBackend, StorageConfig};
use crate::store::FavoritesMap;

/// Key under which the favorites map is persisted.
pub const FAVORITES_KEY: &str = "favorite-pokemons";

/// Abstraction over durable string key-value storage.
///
/// `set` overwrites any previous value for the key.
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `key`, `Ok(None)` if absent.
    fn get(&self, key: &str) -> PersistenceResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> PersistenceResult<()>;

    /// Cheap probe used by readiness checks.
    fn health_check(&self) -> PersistenceResult<()> {
        self.get(FAVORITES_KEY).map(|_| ())
    }

    /// Short backend name for logs and health output.
    fn name(&self) -> &'static str;
}

/// Build the backend selected in configuration.
pub fn open_store(config: &StorageConfig) -> PersistenceResult<Arc<dyn KeyValueStore>> {
    match config.backend {
        StorageBackend::File => {
            let store = FileStore::open(&config.data_dir)?;
            Ok(Arc::new(store))
        }
        StorageBackend::Memory => Ok(Arc::new(MemoryStore::new())),
    }
}

/// Read the persisted favorites map, if any.
pub fn load_favorites(store: &dyn KeyValueStore) -> PersistenceResult<Option<FavoritesMap>> {
    match store.get(FAVORITES_KEY)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Overwrite the persisted favorites map.
pub fn save_favorites(store: &dyn KeyValueStore, favorites: &FavoritesMap) -> PersistenceResult<()> {
    let raw = serde_json::to_string(favorites)?;
    store.set(FAVORITES_KEY, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FavoriteItem;

    #[test]
    fn test_favorites_roundtrip_through_store() {
        let store = MemoryStore::new();
        assert!(load_favorites(&store).unwrap().is_none());

        let mut favorites = FavoritesMap::new();
        favorites.toggle(FavoriteItem::new("25", "Pikachu"));
        save_favorites(&store, &favorites).unwrap();

        assert_eq!(
            store.get(FAVORITES_KEY).unwrap().as_deref(),
            Some(r#"{"25":{"id":"25","name":"Pikachu"}}"#)
        );
        assert_eq!(load_favorites(&store).unwrap(), Some(favorites));
    }

    #[test]
    fn test_load_favorites_rejects_garbage() {
        let store = MemoryStore::new();
        store.set(FAVORITES_KEY, "not json").unwrap();
        assert!(matches!(
            load_favorites(&store),
            Err(PersistenceError::Serialization(_))
        ));
    }

    #[test]
    fn test_open_memory_backend() {
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            ..Default::default()
        };
        let store = open_store(&config).unwrap();
        assert_eq!(store.name(), "memory");
        assert!(store.health_check().is_ok());
    }
}
