//! Root state and root reducer
//!
//! Combines the slices into one snapshot. Intents are routed to the slice that
//! owns them; the other slice is carried over unchanged.

use serde::{Deserialize, Serialize};

use crate::store::counter::{self, CounterState};
use crate::store::effects::Effect;
use crate::store::favorites::{self, FavoritesState};
use crate::store::intent::{Intent, SliceAction};

/// Aggregate state of every slice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RootState {
    pub pokemons: FavoritesState,
    pub counter: CounterState,
}

/// Result of applying one intent to a root state
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: RootState,
    pub effects: Vec<Effect>,
}

/// Pure root reducer
pub fn reduce(state: &RootState, intent: Intent) -> Transition {
    match intent.into_slice_action() {
        SliceAction::Favorites(action) => {
            let (pokemons, effects) = favorites::reduce(&state.pokemons, action);
            Transition {
                state: RootState {
                    pokemons,
                    counter: state.counter,
                },
                effects,
            }
        }
        SliceAction::Counter(action) => Transition {
            state: RootState {
                pokemons: state.pokemons.clone(),
                counter: counter::reduce(&state.counter, action),
            },
            effects: Vec::new(),
        },
    }
}
