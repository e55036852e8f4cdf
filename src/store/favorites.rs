//! Favorites slice
//!
//! Holds the favorites map. `SetFavoritePokemons` replaces it wholesale,
//! `ToggleFavorite` adds or removes one item and asks for the whole resulting
//! map to be written through to durable storage.

use serde::{Deserialize, Serialize};

use crate::store::effects::Effect;
use crate::store::types::{FavoriteItem, FavoritesMap};

/// State of the favorites slice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FavoritesState {
    pub favorites: FavoritesMap,
}

/// Mutations understood by the favorites slice
#[derive(Debug, Clone, PartialEq)]
pub enum FavoritesAction {
    SetFavoritePokemons(FavoritesMap),
    ToggleFavorite(FavoriteItem),
}

/// Compute the next favorites state and the effects the transition requires.
pub fn reduce(state: &FavoritesState, action: FavoritesAction) -> (FavoritesState, Vec<Effect>) {
    match action {
        FavoritesAction::SetFavoritePokemons(favorites) => {
            (FavoritesState { favorites }, Vec::new())
        }
        FavoritesAction::ToggleFavorite(item) => {
            let mut favorites = state.favorites.clone();
            favorites.toggle(item);
            let effects = vec![Effect::PersistFavorites(favorites.clone())];
            (FavoritesState { favorites }, effects)
        }
    }
}
