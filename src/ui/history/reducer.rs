use crate::ui::mvi::Reducer;

use super::intent::HistoryIntent;
use super::state::HistoryDialogState;

/// Rows of history shown at once.
pub const MAX_VISIBLE_ROWS: usize = 16;

pub struct HistoryReducer;

impl Reducer for HistoryReducer {
    type State = HistoryDialogState;
    type Intent = HistoryIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            HistoryIntent::Open { len } => HistoryDialogState::Visible {
                scroll_offset: last_page(len),
                follow: true,
            },
            HistoryIntent::Close => HistoryDialogState::Hidden,
            HistoryIntent::ScrollUp { rows, len } => match state {
                HistoryDialogState::Visible { .. } => {
                    let current = state.first_row(len);
                    HistoryDialogState::Visible {
                        scroll_offset: current.saturating_sub(rows),
                        follow: false,
                    }
                }
                other => other,
            },
            HistoryIntent::ScrollDown { rows, len } => match state {
                HistoryDialogState::Visible { .. } => {
                    let next = (state.first_row(len) + rows).min(last_page(len));
                    HistoryDialogState::Visible {
                        scroll_offset: next,
                        follow: next == last_page(len),
                    }
                }
                other => other,
            },
        }
    }
}

fn last_page(len: usize) -> usize {
    len.saturating_sub(MAX_VISIBLE_ROWS)
}
