//! Reducer trait for MVI architecture.

use super::intent::Intent;
use super::state::UiState;

/// The only place where widget state changes: `(State, Intent) -> State`.
pub trait Reducer {
    type State: UiState;

    type Intent: Intent;

    /// Must be pure; side effects belong to the caller.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
