use crate::ui::mvi::UiState;

/// Popup visibility and scroll position. Entries are read from the session
/// on every frame, so messages arriving while open show up immediately.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HistoryDialogState {
    #[default]
    Hidden,
    Visible {
        scroll_offset: usize,
        /// Follow new entries while scrolled to the end.
        follow: bool,
    },
}

impl UiState for HistoryDialogState {}

impl HistoryDialogState {
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    /// First row to show for a history of `len` entries.
    pub fn first_row(&self, len: usize) -> usize {
        let last_page = len.saturating_sub(super::MAX_VISIBLE_ROWS);
        match self {
            Self::Hidden => 0,
            Self::Visible { follow: true, .. } => last_page,
            Self::Visible { scroll_offset, .. } => (*scroll_offset).min(last_page),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_is_default() {
        assert_eq!(HistoryDialogState::default(), HistoryDialogState::Hidden);
        assert!(!HistoryDialogState::Hidden.is_visible());
    }

    #[test]
    fn following_shows_last_page() {
        let state = HistoryDialogState::Visible {
            scroll_offset: 0,
            follow: true,
        };
        assert_eq!(state.first_row(3), 0);
        assert_eq!(state.first_row(super::super::MAX_VISIBLE_ROWS + 5), 5);
    }
}
