//! Session state machine.
//!
//! One session per connection. The machine has two phases, `Idle` and
//! `ActionInProgress`, derived from whether an action is current.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - Session snapshot (pages, actions, cards, history, connection)
//! - `intent.rs` - Inbound messages, outbound sends, connection events
//! - `reducer.rs` - State transitions (pure, no side effects)
//! - `store.rs` - Owner of the current snapshot

mod intent;
mod reducer;
mod state;
mod store;

pub use intent::SessionIntent;
pub use reducer::SessionReducer;
pub use state::{ConnectionStatus, Direction, HistoryEntry, SessionPhase, SessionState};
pub use store::SessionStore;
