//! Intents
//!
//! Named messages describing a requested mutation. On the wire an intent is
//! `{"type": "<name>", "payload": <value>}`; intents without data omit the
//! payload:
//!
//! ```json
//! {"type": "toggleFavorite", "payload": {"id": "25", "name": "Pikachu"}}
//! {"type": "setFavoritePokemons", "payload": {"25": {"id": "25", "name": "Pikachu"}}}
//! {"type": "addOne"}
//! ```

use serde::{Deserialize, Serialize};

use crate::store::counter::CounterAction;
use crate::store::favorites::FavoritesAction;
use crate::store::types::{FavoriteItem, FavoritesMap};

/// A requested state mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Intent {
    SetFavoritePokemons(FavoritesMap),
    ToggleFavorite(FavoriteItem),
    InitCounterState(i64),
    AddOne,
    SubtractOne,
    ResetCount(i64),
}

/// Intent routed to the slice that owns it
#[derive(Debug, Clone, PartialEq)]
pub enum SliceAction {
    Favorites(FavoritesAction),
    Counter(CounterAction),
}

impl Intent {
    /// Wire name of the intent
    pub fn kind(&self) -> &'static str {
        match self {
            Intent::SetFavoritePokemons(_) => "setFavoritePokemons",
            Intent::ToggleFavorite(_) => "toggleFavorite",
            Intent::InitCounterState(_) => "initCounterState",
            Intent::AddOne => "addOne",
            Intent::SubtractOne => "subtractOne",
            Intent::ResetCount(_) => "resetCount",
        }
    }

    pub fn into_slice_action(self) -> SliceAction {
        match self {
            Intent::SetFavoritePokemons(map) => {
                SliceAction::Favorites(FavoritesAction::SetFavoritePokemons(map))
            }
            Intent::ToggleFavorite(item) => {
                SliceAction::Favorites(FavoritesAction::ToggleFavorite(item))
            }
            Intent::InitCounterState(n) => SliceAction::Counter(CounterAction::InitCounterState(n)),
            Intent::AddOne => SliceAction::Counter(CounterAction::AddOne),
            Intent::SubtractOne => SliceAction::Counter(CounterAction::SubtractOne),
            Intent::ResetCount(n) => SliceAction::Counter(CounterAction::ResetCount(n)),
        }
    }
}
