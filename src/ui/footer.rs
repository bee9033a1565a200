use crate::ui::app::App;
use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct Footer;

impl Default for Footer {
    fn default() -> Self {
        Self::new()
    }
}

impl Footer {
    pub fn new() -> Self {
        Self
    }

    pub fn widget(&self, app: &App, area: Rect) -> Paragraph<'static> {
        let hints = hints(app);
        let version = format!("v{} ", VERSION);

        // Char count, not bytes: hints contain box-drawing characters.
        let hints_width = hints.chars().count();
        let version_width = version.chars().count();
        let content_width = area.width.saturating_sub(2) as usize; // minus borders
        let padding = content_width
            .saturating_sub(hints_width)
            .saturating_sub(version_width);

        let text_style = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);

        let line = Line::from(vec![
            Span::styled(hints, text_style),
            Span::styled(" ".repeat(padding), text_style),
            Span::styled(version, text_style),
        ]);

        Paragraph::new(line)
            .style(text_style)
            .alignment(Alignment::Left)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(GLOBAL_BORDER)),
            )
    }
}

fn hints(app: &App) -> String {
    if app.history_dialog().is_visible() {
        return " Up/Down: Scroll │ Esc: Close │ Ctrl+Q: Quit".to_string();
    }
    let mut parts: Vec<&str> = Vec::new();
    match (app.focused_widget().is_some(), app.shows_action_picker()) {
        (true, picker) => {
            parts.extend(["Tab: Next field", "Enter: Submit"]);
            if picker {
                parts.push("Up/Down: Pick action");
            }
        }
        (false, true) => parts.extend(["Up/Down: Pick action", "Enter: Start"]),
        (false, false) => {}
    }
    parts.extend(["Ctrl+H: History", "Ctrl+Q: Quit"]);
    format!(" {}", parts.join(" │ "))
}
