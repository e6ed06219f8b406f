//! Reducers: the state transition function of a component.

use super::intent::Intent;
use super::state::UiState;

/// Maps (state, intent) to the next state.
///
/// A store runs `reduce` inside a cell transform, so it must not block
/// or touch the store it belongs to. Any follow-up intent should be
/// dispatched from a subscriber instead.
pub trait Reducer {
    type State: UiState;

    type Intent: Intent;

    /// Next state after applying `intent` to `state`.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
