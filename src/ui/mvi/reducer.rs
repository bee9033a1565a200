use super::intent::Intent;
use super::state::UiState;

/// The only place state transitions happen.
///
/// Implementations are pure: no I/O, no clock, no randomness. Anything
/// time-dependent arrives inside the intent.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
