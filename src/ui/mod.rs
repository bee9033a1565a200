//! Terminal front end: renders the session and turns keys into session
//! operations. Everything here runs on the UI thread.

pub mod app;
pub mod cards;
pub mod events;
pub mod footer;
pub mod header;
pub mod history;
pub mod input;
pub mod layout;
pub mod mvi;
pub mod render;
pub mod runtime;
pub mod terminal_guard;
pub mod theme;

pub use app::App;
pub use events::{AppEvent, EventHandler};
pub use runtime::run;
