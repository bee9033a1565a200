//! Model-View-Intent (MVI) primitives.
//!
//! Shared by the session state machine, input drafts and the history popup.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! - **State**: snapshot that is replaced, never edited in place
//! - **Intent**: user input, inbound messages, connection events
//! - **Reducer**: pure `(State, Intent) -> State`

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
