//! Store
//!
//! Owns the current [`RootState`] snapshot. The only way to change it is
//! [`Store::dispatch`]:
//!
//! ```text
//! Intent → root reducer → publish new Arc<RootState> → run effects → broadcast
//! ```
//!
//! The write lock is held until the effects have run, so durable writes land
//! in the same order as the states that produced them. Readers clone the
//! `Arc` and never see a partially applied intent.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

use crate::persistence::{load_favorites, KeyValueStore};
use crate::store::effects::{EffectReport, EffectRunner};
use crate::store::error::StoreResult;
use crate::store::intent::Intent;
use crate::store::root::{self, RootState};

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Immutable view of the store at one revision
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub revision: u64,
    pub updated_at: DateTime<Utc>,
    pub state: Arc<RootState>,
}

/// Broadcast after every dispatch that changed the state
#[derive(Debug, Clone)]
pub struct StoreEvent {
    pub intent: &'static str,
    pub snapshot: Snapshot,
}

/// What a single dispatch did
#[derive(Debug, Clone, Serialize)]
pub struct DispatchOutcome {
    pub intent: &'static str,
    pub revision: u64,
    pub changed: bool,
    pub effects_run: usize,
    pub effects_failed: usize,
}

/// Counters exposed on the health endpoint
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StoreStats {
    pub revision: u64,
    pub dispatches: u64,
    pub effect_failures: u64,
}

/// Process-wide state container
pub struct Store {
    current: RwLock<Snapshot>,
    effects: EffectRunner,
    events: broadcast::Sender<StoreEvent>,
    dispatches: AtomicU64,
    effect_failures: AtomicU64,
}

impl Store {
    /// Create a store with empty favorites and a zero cart count
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::with_state(RootState::default(), storage)
    }

    pub fn with_state(initial: RootState, storage: Arc<dyn KeyValueStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            current: RwLock::new(Snapshot {
                revision: 0,
                updated_at: Utc::now(),
                state: Arc::new(initial),
            }),
            effects: EffectRunner::new(storage),
            events,
            dispatches: AtomicU64::new(0),
            effect_failures: AtomicU64::new(0),
        }
    }

    /// Current snapshot with revision metadata
    pub fn snapshot(&self) -> StoreResult<Snapshot> {
        Ok(self.current.read()?.clone())
    }

    /// Current root state
    pub fn state(&self) -> StoreResult<Arc<RootState>> {
        Ok(Arc::clone(&self.current.read()?.state))
    }

    /// Project the current state through a selector
    pub fn select<T, F>(&self, selector: F) -> StoreResult<T>
    where
        F: FnOnce(&RootState) -> T,
    {
        let state = self.state()?;
        Ok(selector(&state))
    }

    /// Apply an intent.
    ///
    /// Effect failures are logged and counted but never fail the dispatch.
    pub fn dispatch(&self, intent: Intent) -> StoreResult<DispatchOutcome> {
        self.dispatch_with_snapshot(intent).map(|(outcome, _)| outcome)
    }

    /// Apply an intent and return the snapshot it produced.
    ///
    /// Use this instead of `dispatch` followed by `snapshot()` when the
    /// resulting state is needed: another dispatch may land in between.
    pub fn dispatch_with_snapshot(
        &self,
        intent: Intent,
    ) -> StoreResult<(DispatchOutcome, Snapshot)> {
        let kind = intent.kind();
        let mut current = self.current.write()?;

        let transition = root::reduce(&current.state, intent);
        let changed = transition.state != *current.state;

        if changed {
            current.revision += 1;
            current.updated_at = Utc::now();
            current.state = Arc::new(transition.state);
        }

        // Effects may block on file I/O; async callers go through
        // `spawn_blocking` so the lock is never held on a runtime worker.
        let report = if transition.effects.is_empty() {
            EffectReport::default()
        } else {
            self.effects.run(&transition.effects)
        };

        let snapshot = current.clone();
        drop(current);

        self.dispatches.fetch_add(1, Ordering::Relaxed);
        if report.failed > 0 {
            self.effect_failures
                .fetch_add(report.failed as u64, Ordering::Relaxed);
        }

        tracing::debug!(
            intent = kind,
            revision = snapshot.revision,
            changed,
            effects = report.executed,
            failed = report.failed,
            "Dispatched intent"
        );

        let outcome = DispatchOutcome {
            intent: kind,
            revision: snapshot.revision,
            changed,
            effects_run: report.executed,
            effects_failed: report.failed,
        };

        if changed {
            // No receivers is fine
            let _ = self.events.send(StoreEvent {
                intent: kind,
                snapshot: snapshot.clone(),
            });
        }

        Ok((outcome, snapshot))
    }

    /// Receive an event for every state change from now on
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Replace favorites with the durable copy, if one exists.
    ///
    /// Returns the number of favorites loaded. Goes through the regular
    /// `setFavoritePokemons` intent, which does not write back.
    pub fn hydrate_favorites(&self) -> StoreResult<usize> {
        match load_favorites(self.effects.storage().as_ref())? {
            Some(favorites) => {
                let count = favorites.len();
                self.dispatch(Intent::SetFavoritePokemons(favorites))?;
                Ok(count)
            }
            None => Ok(0),
        }
    }

    pub fn storage(&self) -> &Arc<dyn KeyValueStore> {
        self.effects.storage()
    }

    pub fn stats(&self) -> StoreResult<StoreStats> {
        Ok(StoreStats {
            revision: self.current.read()?.revision,
            dispatches: self.dispatches.load(Ordering::Relaxed),
            effect_failures: self.effect_failures.load(Ordering::Relaxed),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{FileStore, MemoryStore, FAVORITES_KEY};
    use crate::store::selectors::{select_cart_count, select_favorite_count};
    use crate::store::types::{FavoriteItem, FavoritesMap};
    use tempfile::tempdir;

    fn create_test_store() -> (Store, Arc<MemoryStore>) {
        let storage = Arc::new(MemoryStore::new());
        let store = Store::new(storage.clone());
        (store, storage)
    }

    fn pikachu() -> FavoriteItem {
        FavoriteItem::new("25", "Pikachu")
    }

    #[test]
    fn test_toggle_on_empty_persists_single_entry() {
        let (store, storage) = create_test_store();

        let outcome = store.dispatch(Intent::ToggleFavorite(pikachu())).unwrap();

        assert!(outcome.changed);
        assert_eq!(outcome.revision, 1);
        assert_eq!(outcome.effects_run, 1);

        let state = store.state().unwrap();
        assert_eq!(state.pokemons.favorites.get("25"), Some(&pikachu()));
        assert_eq!(
            storage.get(FAVORITES_KEY).unwrap().as_deref(),
            Some(r#"{"25":{"id":"25","name":"Pikachu"}}"#)
        );
    }

    #[test]
    fn test_second_toggle_persists_empty_object() {
        let (store, storage) = create_test_store();

        store.dispatch(Intent::ToggleFavorite(pikachu())).unwrap();
        store.dispatch(Intent::ToggleFavorite(pikachu())).unwrap();

        assert!(store.state().unwrap().pokemons.favorites.is_empty());
        assert_eq!(storage.get(FAVORITES_KEY).unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_exactly_one_write_per_toggle() {
        let (store, storage) = create_test_store();

        for id in ["1", "4", "7", "1"] {
            store
                .dispatch(Intent::ToggleFavorite(FavoriteItem::new(id, "x")))
                .unwrap();

            let persisted: FavoritesMap =
                serde_json::from_str(&storage.get(FAVORITES_KEY).unwrap().unwrap()).unwrap();
            assert_eq!(persisted, store.state().unwrap().pokemons.favorites);
        }

        assert_eq!(storage.write_count(), 4);
    }

    #[test]
    fn test_set_and_counter_do_not_write() {
        let (store, storage) = create_test_store();

        store
            .dispatch(Intent::SetFavoritePokemons(
                vec![pikachu()].into_iter().collect(),
            ))
            .unwrap();
        store.dispatch(Intent::AddOne).unwrap();

        assert_eq!(storage.write_count(), 0);
        assert_eq!(store.select(select_favorite_count).unwrap(), 1);
        assert_eq!(store.select(select_cart_count).unwrap(), 1);
    }

    #[test]
    fn test_snapshots_are_not_mutated_by_later_dispatch() {
        let (store, _storage) = create_test_store();
        let before = store.state().unwrap();

        store.dispatch(Intent::ToggleFavorite(pikachu())).unwrap();

        assert!(before.pokemons.favorites.is_empty());
        assert_eq!(store.state().unwrap().pokemons.favorites.len(), 1);
    }

    #[test]
    fn test_noop_dispatch_keeps_revision() {
        let (store, _storage) = create_test_store();

        let outcome = store.dispatch(Intent::SubtractOne).unwrap();

        assert!(!outcome.changed);
        assert_eq!(outcome.revision, 0);
        assert_eq!(store.stats().unwrap().dispatches, 1);
    }

    #[test]
    fn test_storage_failure_keeps_state() {
        let (store, storage) = create_test_store();
        storage.set_unavailable(true);

        let outcome = store.dispatch(Intent::ToggleFavorite(pikachu())).unwrap();

        assert_eq!(outcome.effects_failed, 1);
        assert!(store.state().unwrap().pokemons.favorites.contains("25"));
        assert_eq!(store.stats().unwrap().effect_failures, 1);
    }

    #[test]
    fn test_hydrate_from_file_store() {
        let dir = tempdir().unwrap();

        {
            let storage = Arc::new(FileStore::open(dir.path()).unwrap());
            let store = Store::new(storage);
            store.dispatch(Intent::ToggleFavorite(pikachu())).unwrap();
        }

        let storage = Arc::new(FileStore::open(dir.path()).unwrap());
        let store = Store::new(storage);
        assert_eq!(store.select(select_favorite_count).unwrap(), 0);

        assert_eq!(store.hydrate_favorites().unwrap(), 1);
        assert!(store.state().unwrap().pokemons.favorites.contains("25"));
    }

    #[test]
    fn test_dispatch_returns_its_own_snapshot() {
        let (store, _storage) = create_test_store();

        let (outcome, snapshot) = store
            .dispatch_with_snapshot(Intent::ToggleFavorite(pikachu()))
            .unwrap();
        store.dispatch(Intent::AddOne).unwrap();

        assert_eq!(snapshot.revision, outcome.revision);
        assert!(snapshot.state.pokemons.favorites.contains("25"));
        assert_eq!(snapshot.state.counter.count, 0);
        assert_eq!(store.snapshot().unwrap().revision, 2);
    }

    #[test]
    fn test_concurrent_dispatches_pair_outcome_and_snapshot() {
        let (store, storage) = create_test_store();
        let store = Arc::new(store);

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        let item = FavoriteItem::new(format!("{}-{}", t, i), "x");
                        let (outcome, snapshot) = store
                            .dispatch_with_snapshot(Intent::ToggleFavorite(item))
                            .unwrap();
                        assert_eq!(snapshot.revision, outcome.revision);
                        assert_eq!(
                            snapshot.state.pokemons.favorites.len() as u64,
                            outcome.revision
                        );
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.select(select_favorite_count).unwrap(), 400);
        assert_eq!(storage.write_count(), 400);
    }

    #[test]
    fn test_hydrate_without_durable_copy() {
        let (store, _storage) = create_test_store();
        assert_eq!(store.hydrate_favorites().unwrap(), 0);
        assert_eq!(store.snapshot().unwrap().revision, 0);
    }

    #[tokio::test]
    async fn test_subscribers_receive_changes_only() {
        let (store, _storage) = create_test_store();
        let mut rx = store.subscribe();

        store.dispatch(Intent::SubtractOne).unwrap();
        store.dispatch(Intent::AddOne).unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(event.intent, "addOne");
        assert_eq!(event.snapshot.revision, 1);
        assert_eq!(event.snapshot.state.counter.count, 1);
        assert!(rx.try_recv().is_err());
    }
}
