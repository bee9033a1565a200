//! Intents for the session state machine.

use std::time::SystemTime;

use crate::protocol::{InboundMessage, OutboundMessage};
use crate::ui::mvi::Intent;

/// Events that can change a [`SessionState`](super::SessionState).
///
/// Timestamps are stamped by the caller so the reducer stays pure.
#[derive(Debug, Clone)]
pub enum SessionIntent {
    /// Transport attached.
    ConnectionOpened,

    /// Transport gone; the session will not resume.
    ConnectionClosed { reason: Option<String> },

    /// User (or auto-start) began an action. Recorded as an outbound `start`.
    StartAction { name: String, at: SystemTime },

    /// Any other outbound message that was handed to the transport.
    Sent {
        message: OutboundMessage,
        at: SystemTime,
    },

    /// A decoded message from the server.
    Received {
        message: InboundMessage,
        at: SystemTime,
    },
}

impl Intent for SessionIntent {}
