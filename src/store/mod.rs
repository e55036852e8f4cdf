//! Dashboard State Store
//!
//! A small reducer-based state container:
//!
//! - **types**: Favorite items and the favorites map
//! - **favorites**: Favorites slice (replace-all, toggle)
//! - **counter**: Cart counter slice
//! - **intent**: Wire format of requested mutations
//! - **root**: Aggregate state and root reducer
//! - **effects**: Side effects requested by reducers and their runner
//! - **selectors**: Read projections
//! - **engine**: The [`Store`] tying it together
//! - **error**: Error types
//!
//! # Architecture
//!
//! ```text
//! Dispatch:
//!   Intent → reducer (pure) → new snapshot → EffectRunner → durable storage
//!                                         └→ broadcast StoreEvent
//!
//! Read:
//!   snapshot() / select(selector) → Arc<RootState>
//! ```
//!
//! # Example
//!
//! ```rust
//! use dashboard::persistence::MemoryStore;
//! use dashboard::store::{selectors, FavoriteItem, Intent, Store};
//! use std::sync::Arc;
//!
//! let store = Store::new(Arc::new(MemoryStore::new()));
//! store
//!     .dispatch(Intent::ToggleFavorite(FavoriteItem::new("25", "Pikachu")))
//!     .unwrap();
//!
//! assert!(store.select(|s| selectors::select_is_favorite(s, "25")).unwrap());
//! ```

pub mod counter;
pub mod effects;
pub mod engine;
pub mod error;
pub mod favorites;
pub mod intent;
pub mod root;
pub mod selectors;
pub mod types;

// Re-export commonly used types
pub use counter::{CounterAction, CounterState};
pub use effects::{Effect, EffectReport, EffectRunner};
pub use engine::{DispatchOutcome, Snapshot, Store, StoreEvent, StoreStats};
pub use error::{StoreError, StoreResult};
pub use favorites::{FavoritesAction, FavoritesState};
pub use intent::{Intent, SliceAction};
pub use root::{RootState, Transition};
pub use types::{FavoriteItem, FavoritesMap};
