use uuid::Uuid;

use crate::ui::mvi::Reducer;

use super::intent::SessionIntent;
use super::reducer::SessionReducer;
use super::state::SessionState;

/// Owner of the one [`SessionState`] of a connection.
///
/// The store has no transport and no clock; it only applies intents.
#[derive(Debug, Default)]
pub struct SessionStore {
    state: SessionState,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn dispatch(&mut self, intent: SessionIntent) {
        // Placeholder only; `SessionState::default()` mints a random id.
        let current = std::mem::replace(&mut self.state, SessionState::with_id(Uuid::nil()));
        self.state = SessionReducer::reduce(current, intent);
    }
}
