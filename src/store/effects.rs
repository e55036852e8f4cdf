//! Side effects produced by reducers
//!
//! Reducers stay pure: they describe the I/O a transition requires as
//! [`Effect`] values and the [`EffectRunner`] performs it after the new state
//! has been published.
//!
//! Failure policy is log-and-continue. A failed durable write leaves the
//! in-memory state untouched and is only reported through [`EffectReport`].

use std::sync::Arc;

use crate::persistence::{save_favorites, KeyValueStore, FAVORITES_KEY};
use crate::store::types::FavoritesMap;

/// I/O requested by a state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Overwrite the durable favorites copy with this map
    PersistFavorites(FavoritesMap),
}

impl Effect {
    pub fn kind(&self) -> &'static str {
        match self {
            Effect::PersistFavorites(_) => "persist_favorites",
        }
    }
}

/// Outcome of running a batch of effects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EffectReport {
    pub executed: usize,
    pub failed: usize,
}

/// Executes effects against durable storage
#[derive(Clone)]
pub struct EffectRunner {
    storage: Arc<dyn KeyValueStore>,
}

impl EffectRunner {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &Arc<dyn KeyValueStore> {
        &self.storage
    }

    /// Run every effect once, in order
    pub fn run(&self, effects: &[Effect]) -> EffectReport {
        let mut report = EffectReport::default();

        for effect in effects {
            report.executed += 1;
            match effect {
                Effect::PersistFavorites(favorites) => {
                    match save_favorites(self.storage.as_ref(), favorites) {
                        Ok(()) => {
                            tracing::debug!(
                                effect = effect.kind(),
                                key = FAVORITES_KEY,
                                backend = self.storage.name(),
                                favorites = favorites.len(),
                                "Persisted favorites"
                            );
                        }
                        Err(e) => {
                            report.failed += 1;
                            tracing::warn!(
                                effect = effect.kind(),
                                key = FAVORITES_KEY,
                                backend = self.storage.name(),
                                error = %e,
                                "Failed to persist favorites, keeping in-memory state"
                            );
                        }
                    }
                }
            }
        }

        report
    }
}
