use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum HistoryIntent {
    /// Show the popup scrolled to the newest entries.
    Open { len: usize },
    Close,
    ScrollUp { rows: usize, len: usize },
    ScrollDown { rows: usize, len: usize },
}

impl Intent for HistoryIntent {}
