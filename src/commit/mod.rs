//! Commit protocol for input cards.
//!
//! Each input card gets an [`InputWidget`] holding a private [`Draft`]. Edits
//! go through [`DraftReducer`]; [`InputWidget::attempt_commit`] validates the
//! draft and sends it through an [`InputSink`] at most once.

mod draft;
mod validate;
mod widget;

pub use draft::{Draft, DraftIntent, DraftReducer};
pub use validate::{validate, ValidationError};
pub use widget::{CommitError, InputSink, InputWidget};
