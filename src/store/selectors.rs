//! Read selectors
//!
//! Pure projections of [`RootState`] for consumers.

use crate::store::root::RootState;
use crate::store::types::{FavoriteItem, FavoritesMap};

/// Number of items in the cart
pub fn select_cart_count(state: &RootState) -> u64 {
    state.counter.count
}

/// Whether the counter has been initialized
pub fn select_counter_ready(state: &RootState) -> bool {
    state.counter.is_ready
}

pub fn select_favorites_map(state: &RootState) -> &FavoritesMap {
    &state.pokemons.favorites
}

/// Favorite items as a list, in id order
pub fn select_favorites(state: &RootState) -> Vec<&FavoriteItem> {
    state.pokemons.favorites.items().collect()
}

pub fn select_favorite_count(state: &RootState) -> usize {
    state.pokemons.favorites.len()
}

pub fn select_is_favorite(state: &RootState, id: &str) -> bool {
    state.pokemons.favorites.contains(id)
}
