//! # Dashboard
//!
//! Back-end for a small shop dashboard: a shopping-cart counter and a set of
//! favorite pokémon, held in a reducer-based state store whose favorites are
//! written through to durable key-value storage.
//!
//! ## Modules
//!
//! - [`store`]: State container, reducers, intents, selectors, effects
//! - [`persistence`]: Durable key-value backends (file, memory)
//! - [`api`]: REST API server with Axum
//! - [`websocket`]: Live state updates
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dashboard::persistence::FileStore;
//! use dashboard::store::{FavoriteItem, Intent, Store};
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let storage = Arc::new(FileStore::open("./dashboard_data")?);
//!     let store = Store::new(storage);
//!
//!     // Written through to ./dashboard_data/favorite-pokemons.json
//!     store.dispatch(Intent::ToggleFavorite(FavoriteItem::new("25", "Pikachu")))?;
//!     store.dispatch(Intent::AddOne)?;
//!
//!     let snapshot = store.snapshot()?;
//!     println!("revision {}: {:?}", snapshot.revision, snapshot.state);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod persistence;
pub mod store;
pub mod websocket;

// Re-export top-level types for convenience
pub use store::{
    DispatchOutcome, FavoriteItem, FavoritesMap, Intent, RootState, Snapshot, Store, StoreError,
    StoreEvent, StoreResult,
};

pub use persistence::{
    FileStore, KeyValueStore, MemoryStore, PersistenceError, PersistenceResult, FAVORITES_KEY,
};

pub use api::{build_router, serve, ApiError, AppState};

pub use websocket::{websocket_handler, ClientMessage, ServerMessage};

pub use config::{
    ApiConfig, Config, ConfigError, LoggingConfig, StorageBackend, StorageConfig, StoreConfig,
};
