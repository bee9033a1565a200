use crate::commit::{DraftIntent, InputWidget};
use crate::connection::{ConnectionController, ConnectionEvent};
use crate::session::SessionState;
use crate::ui::history::{HistoryDialogState, HistoryIntent, HistoryReducer};
use crate::ui::mvi::Reducer;

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

pub struct App {
    should_quit: bool,
    page_url: String,
    controller: ConnectionController,
    /// One slot per card in `cards`; `Some` for input cards.
    widgets: Vec<Option<InputWidget>>,
    /// Count of `start` messages the widget list belongs to.
    widgets_generation: usize,
    focused: Option<usize>,
    action_selection: usize,
    /// Transient status line, e.g. a refused action start.
    notice: Option<String>,
    /// State of the history dialog (MVI pattern).
    history_dialog: HistoryDialogState,
}

impl App {
    pub fn new(controller: ConnectionController, page_url: impl Into<String>) -> Self {
        let mut app = Self {
            should_quit: false,
            page_url: page_url.into(),
            controller,
            widgets: Vec::new(),
            widgets_generation: 0,
            focused: None,
            action_selection: 0,
            notice: None,
            history_dialog: HistoryDialogState::default(),
        };
        app.sync_widgets();
        app
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    /// Close the connection from our side.
    pub fn disconnect(&mut self) {
        self.controller.disconnect();
    }

    pub fn page_url(&self) -> &str {
        &self.page_url
    }

    pub fn session(&self) -> &SessionState {
        self.controller.state()
    }

    pub fn is_connected(&self) -> bool {
        self.controller.is_connected()
    }

    pub fn widget(&self, card_index: usize) -> Option<&InputWidget> {
        self.widgets.get(card_index).and_then(Option::as_ref)
    }

    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    pub fn focused_widget(&self) -> Option<&InputWidget> {
        self.focused.and_then(|index| self.widget(index))
    }

    pub fn action_selection(&self) -> usize {
        self.action_selection
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// An action ran and the server ended it with `done`.
    pub fn is_completed(&self) -> bool {
        let state = self.session();
        state.has_started_action() && state.is_idle()
    }

    pub fn shows_action_picker(&self) -> bool {
        let state = self.session();
        state.is_idle() && !state.actions.is_empty()
    }

    /// Every inbound error of the session, oldest first. Starting a new
    /// action does not hide earlier ones.
    pub fn banner_errors(&self) -> Vec<&str> {
        self.session().errors()
    }

    pub fn on_connection(&mut self, event: ConnectionEvent) {
        if let ConnectionEvent::Error(error) = &event {
            self.notice = Some(format!("Connection error: {error}"));
        }
        self.controller.handle(event);
        self.sync_widgets();
        self.clamp_action_selection();
    }

    // ========================================================================
    // Input widgets
    // ========================================================================

    pub fn focus_next(&mut self) {
        self.move_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.move_focus(-1);
    }

    pub fn edit_focused(&mut self, intent: DraftIntent) {
        let slot = self.focused.and_then(|index| self.widgets.get_mut(index));
        if let Some(Some(widget)) = slot {
            widget.edit(intent);
        }
    }

    /// Commit the focused widget. Focus moves on when a value was sent.
    pub fn commit_focused(&mut self) -> bool {
        let Some(index) = self.focused else {
            return false;
        };
        let Some(Some(widget)) = self.widgets.get_mut(index) else {
            return false;
        };
        let committed = widget.attempt_commit(&mut self.controller);
        if committed {
            self.notice = None;
            self.focused = self.next_uncommitted(index, 1);
        }
        committed
    }

    fn sync_widgets(&mut self) {
        let state = self.controller.state();
        let generation = state
            .outbound()
            .filter(|entry| entry.envelope.kind == "start")
            .count();
        if generation != self.widgets_generation || state.cards.len() < self.widgets.len() {
            self.widgets.clear();
            self.focused = None;
            self.widgets_generation = generation;
        }
        let known = self.widgets.len();
        self.widgets
            .extend(state.cards[known..].iter().map(InputWidget::for_card));

        let focus_valid = self
            .focused
            .and_then(|index| self.widget(index))
            .is_some_and(|widget| !widget.has_committed());
        if !focus_valid {
            self.focused = self.first_uncommitted();
        }
    }

    fn first_uncommitted(&self) -> Option<usize> {
        self.widgets
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|w| !w.has_committed()))
    }

    /// Next uncommitted widget after `from` in `step` direction, wrapping.
    fn next_uncommitted(&self, from: usize, step: isize) -> Option<usize> {
        let len = self.widgets.len() as isize;
        if len == 0 {
            return None;
        }
        (1..=len)
            .map(|offset| (from as isize + step * offset).rem_euclid(len) as usize)
            .find(|&index| self.widget(index).is_some_and(|w| !w.has_committed()))
    }

    fn move_focus(&mut self, step: isize) {
        self.focused = match self.focused {
            Some(index) => self.next_uncommitted(index, step),
            None => self.first_uncommitted(),
        };
    }

    // ========================================================================
    // Action picker
    // ========================================================================

    pub fn move_action_selection(&mut self, direction: i32) {
        let len = self.session().actions.len();
        if len == 0 {
            self.action_selection = 0;
            return;
        }
        let current = self.action_selection.min(len - 1);
        self.action_selection = if direction.is_negative() {
            if current == 0 {
                len - 1
            } else {
                current - 1
            }
        } else if current + 1 >= len {
            0
        } else {
            current + 1
        };
    }

    pub fn start_selected_action(&mut self) {
        let Some(action) = self.session().actions.get(self.action_selection) else {
            return;
        };
        let name = action.name.clone();
        match self.controller.start_action(name.clone()) {
            Ok(()) => {
                self.notice = None;
                self.sync_widgets();
            }
            Err(err) => self.notice = Some(format!("Could not start '{name}': {err}")),
        }
    }

    fn clamp_action_selection(&mut self) {
        let len = self.session().actions.len();
        self.action_selection = self.action_selection.min(len.saturating_sub(1));
    }

    // ========================================================================
    // History dialog methods (MVI pattern)
    // ========================================================================

    pub fn history_dialog(&self) -> &HistoryDialogState {
        &self.history_dialog
    }

    pub fn toggle_history(&mut self) {
        if self.history_dialog.is_visible() {
            self.dispatch_history(HistoryIntent::Close);
        } else {
            let len = self.session().history.len();
            self.dispatch_history(HistoryIntent::Open { len });
        }
    }

    pub fn close_history(&mut self) {
        self.dispatch_history(HistoryIntent::Close);
    }

    pub fn scroll_history(&mut self, rows: isize) {
        let len = self.session().history.len();
        let intent = if rows.is_negative() {
            HistoryIntent::ScrollUp {
                rows: rows.unsigned_abs(),
                len,
            }
        } else {
            HistoryIntent::ScrollDown {
                rows: rows as usize,
                len,
            }
        };
        self.dispatch_history(intent);
    }

    fn dispatch_history(&mut self, intent: HistoryIntent) {
        dispatch_mvi!(self, history_dialog, HistoryReducer, intent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commit::Draft;
    use crate::connection::MemoryTransport;
    use serde_json::json;

    fn connected(default_action: &str) -> (App, MemoryTransport) {
        let transport = MemoryTransport::new();
        let mut app = App::new(ConnectionController::new(default_action), "http://host/a/x");
        app.controller.on_open(Box::new(transport.clone()));
        app.sync_widgets();
        (app, transport)
    }

    fn frame(app: &mut App, raw: &str) {
        app.on_connection(ConnectionEvent::Frame(raw.to_string()));
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.edit_focused(DraftIntent::Insert(ch));
        }
    }

    #[test]
    fn focus_lands_on_first_input_and_skips_display_cards() {
        let (mut app, _transport) = connected("survey");
        frame(&mut app, r#"{"type":"display","data":{"text":"Survey"}}"#);
        assert_eq!(app.focused(), None);
        frame(&mut app, r#"{"type":"textInput","data":{"label":"Name"}}"#);
        frame(&mut app, r#"{"type":"booleanInput","data":{"label":"Agree"}}"#);
        assert_eq!(app.focused(), Some(1));

        app.focus_next();
        assert_eq!(app.focused(), Some(2));
        app.focus_next();
        assert_eq!(app.focused(), Some(1));
        app.focus_prev();
        assert_eq!(app.focused(), Some(2));
    }

    #[test]
    fn commit_sends_once_and_moves_focus() {
        let (mut app, transport) = connected("survey");
        frame(&mut app, r#"{"type":"textInput","data":{"label":"Name"}}"#);
        frame(&mut app, r#"{"type":"numberInput","data":{"label":"Age"}}"#);
        type_text(&mut app, "Ada");
        assert!(app.commit_focused());
        assert_eq!(app.focused(), Some(1));
        assert!(app.widget(0).is_some_and(InputWidget::has_committed));

        app.focused = Some(0);
        assert!(!app.commit_focused());
        let inputs: Vec<_> = transport
            .sent_json()
            .into_iter()
            .filter(|frame| frame["type"] == "input")
            .collect();
        assert_eq!(inputs, vec![json!({"type": "input", "data": "Ada"})]);
    }

    #[test]
    fn new_action_discards_widgets() {
        let (mut app, _transport) = connected("first");
        frame(&mut app, r#"{"type":"actions","data":[{"name":"first"},{"name":"second"}]}"#);
        frame(&mut app, r#"{"type":"textInput","data":{}}"#);
        type_text(&mut app, "draft");
        frame(&mut app, r#"{"type":"done"}"#);
        assert!(app.is_completed());
        assert!(app.shows_action_picker());

        app.move_action_selection(1);
        app.start_selected_action();
        assert_eq!(app.session().current_action.as_deref(), Some("second"));
        assert!(app.widget(0).is_none());

        frame(&mut app, r#"{"type":"textInput","data":{}}"#);
        assert_eq!(app.focused_widget().map(InputWidget::draft), Some(&Draft::Text(String::new())));
    }

    #[test]
    fn action_selection_wraps() {
        let (mut app, _transport) = connected("");
        frame(&mut app, r#"{"type":"actions","data":[{"name":"a"},{"name":"b"},{"name":"c"}]}"#);
        app.move_action_selection(-1);
        assert_eq!(app.action_selection(), 2);
        app.move_action_selection(1);
        assert_eq!(app.action_selection(), 0);
    }

    #[test]
    fn start_while_disconnected_sets_notice() {
        let mut app = App::new(ConnectionController::new("x"), "http://host/a/x");
        app.on_connection(ConnectionEvent::Frame(
            r#"{"type":"actions","data":[{"name":"x"}]}"#.to_string(),
        ));
        app.start_selected_action();
        assert!(app.notice().is_some_and(|n| n.contains("not connected")));
        assert_eq!(app.session().current_action, None);
    }

    #[test]
    fn banner_keeps_errors_across_actions() {
        let (mut app, _transport) = connected("first");
        frame(&mut app, r#"{"type":"error","data":"old"}"#);
        frame(&mut app, r#"{"type":"actions","data":[{"name":"first"}]}"#);
        frame(&mut app, r#"{"type":"done"}"#);
        app.start_selected_action();
        assert_eq!(app.session().current_action.as_deref(), Some("first"));
        frame(&mut app, r#"{"type":"error","data":"new"}"#);
        assert_eq!(app.banner_errors(), vec!["old", "new"]);
    }

    #[test]
    fn history_toggle_opens_and_closes() {
        let (mut app, _transport) = connected("x");
        app.toggle_history();
        assert!(app.history_dialog().is_visible());
        app.scroll_history(-3);
        app.toggle_history();
        assert!(!app.history_dialog().is_visible());
    }
}
