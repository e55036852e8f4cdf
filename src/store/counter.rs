//! Cart counter slice
//!
//! A single non-negative count of items added to the cart. The counter can be
//! initialized exactly once (`isReady` flips to true); afterwards only
//! add/subtract/reset change it.

use serde::{Deserialize, Serialize};

/// State of the counter slice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterState {
    pub count: u64,
    pub is_ready: bool,
}

/// Mutations understood by the counter slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterAction {
    InitCounterState(i64),
    AddOne,
    SubtractOne,
    ResetCount(i64),
}

/// Negative requests clamp to zero
fn clamp_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

pub fn reduce(state: &CounterState, action: CounterAction) -> CounterState {
    match action {
        CounterAction::InitCounterState(value) => {
            if state.is_ready {
                return *state;
            }
            CounterState {
                count: clamp_count(value),
                is_ready: true,
            }
        }
        CounterAction::AddOne => CounterState {
            count: state.count.saturating_add(1),
            ..*state
        },
        CounterAction::SubtractOne => CounterState {
            count: state.count.saturating_sub(1),
            ..*state
        },
        CounterAction::ResetCount(value) => CounterState {
            count: clamp_count(value),
            ..*state
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_only_once() {
        let state = reduce(&CounterState::default(), CounterAction::InitCounterState(20));
        assert_eq!(state, CounterState { count: 20, is_ready: true });

        let again = reduce(&state, CounterAction::InitCounterState(5));
        assert_eq!(again.count, 20);
    }

    #[test]
    fn test_add_and_subtract() {
        let mut state = CounterState::default();
        state = reduce(&state, CounterAction::AddOne);
        state = reduce(&state, CounterAction::AddOne);
        state = reduce(&state, CounterAction::SubtractOne);
        assert_eq!(state.count, 1);
    }

    #[test]
    fn test_subtract_floors_at_zero() {
        let state = reduce(&CounterState::default(), CounterAction::SubtractOne);
        assert_eq!(state.count, 0);
    }

    #[test]
    fn test_reset_clamps_negative() {
        let state = CounterState { count: 7, is_ready: true };
        assert_eq!(reduce(&state, CounterAction::ResetCount(-3)).count, 0);
        assert_eq!(reduce(&state, CounterAction::ResetCount(3)).count, 3);
        assert!(reduce(&state, CounterAction::ResetCount(3)).is_ready);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_string(&CounterState { count: 2, is_ready: true }).unwrap();
        assert_eq!(json, r#"{"count":2,"isReady":true}"#);
    }
}
