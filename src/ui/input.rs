use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::commit::{Draft, DraftIntent};
use crate::protocol::CardBody;
use crate::ui::app::App;
use crate::ui::history::MAX_VISIBLE_ROWS;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if is_ctrl_char(key, 'q') {
        app.request_quit();
        return;
    }
    if is_ctrl_char(key, 'h') {
        app.toggle_history();
        return;
    }

    if app.history_dialog().is_visible() {
        match key.code {
            KeyCode::Esc => app.close_history(),
            KeyCode::Up => app.scroll_history(-1),
            KeyCode::Down => app.scroll_history(1),
            KeyCode::PageUp => app.scroll_history(-(MAX_VISIBLE_ROWS as isize)),
            KeyCode::PageDown => app.scroll_history(MAX_VISIBLE_ROWS as isize),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_prev(),
        KeyCode::Esc => app.clear_notice(),
        _ if app.focused_widget().is_some() => handle_widget_key(app, key),
        _ => handle_picker_key(app, key),
    }
}

/// Keys for the focused input widget. Up/Down fall through to the action
/// picker unless the widget is a slider.
fn handle_widget_key(app: &mut App, key: KeyEvent) {
    let Some(widget) = app.focused_widget() else {
        return;
    };
    let multiline = matches!(
        widget.body(),
        CardBody::TextAreaInput(_) | CardBody::RichTextInput(_)
    );
    let is_slider = matches!(widget.draft(), Draft::Slider { .. });
    let is_toggle = matches!(widget.draft(), Draft::Toggle(_));
    let is_files = matches!(widget.draft(), Draft::Files { .. });

    match key.code {
        KeyCode::Enter if multiline && key.modifiers.contains(KeyModifiers::ALT) => {
            app.edit_focused(DraftIntent::Insert('\n'));
        }
        KeyCode::Enter => {
            app.commit_focused();
        }
        KeyCode::Up | KeyCode::Right if is_slider => app.edit_focused(DraftIntent::Increase),
        KeyCode::Down | KeyCode::Left if is_slider => app.edit_focused(DraftIntent::Decrease),
        KeyCode::Up | KeyCode::Down => handle_picker_key(app, key),
        KeyCode::Char(' ') if is_toggle => app.edit_focused(DraftIntent::Toggle),
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.edit_focused(DraftIntent::Insert(ch));
        }
        KeyCode::Backspace => app.edit_focused(DraftIntent::Backspace),
        KeyCode::Delete if is_files => app.edit_focused(DraftIntent::RemoveLastFile),
        KeyCode::Delete => app.edit_focused(DraftIntent::Clear),
        _ => {}
    }
}

fn handle_picker_key(app: &mut App, key: KeyEvent) {
    if !app.shows_action_picker() {
        return;
    }
    match key.code {
        KeyCode::Up => app.move_action_selection(-1),
        KeyCode::Down => app.move_action_selection(1),
        KeyCode::Enter => app.start_selected_action(),
        _ => {}
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::SHIFT)
}
