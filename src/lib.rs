//! Terminal client for server-driven card flows.
//!
//! The server pushes cards over a websocket; the client renders them, collects
//! input and commits it back. See [`session`] for the state machine and
//! [`protocol`] for the wire format.

pub mod commit;
pub mod config;
pub mod connection;
pub mod logging;
pub mod protocol;
pub mod session;
pub mod shutdown;
pub mod ui;
