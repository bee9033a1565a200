use crate::session::{ConnectionStatus, SessionState};
use crate::ui::theme::{
    ACCENT, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, MUTED_TEXT, STATUS_ERROR, STATUS_OK,
    STATUS_WARN,
};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }

    pub fn widget(&self, page_url: &str, session: &SessionState) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let (status, status_color) = status_label(&session.connection);
        let action = match &session.current_action {
            Some(name) => Span::styled(name.clone(), Style::default().fg(ACCENT)),
            None => Span::styled("idle", Style::default().fg(MUTED_TEXT)),
        };
        let line = Line::from(vec![
            Span::styled("  ", text_style),
            Span::styled("●", Style::default().fg(status_color)),
            Span::styled(" ", text_style),
            Span::styled(status, text_style),
            Span::styled("  │  ", separator_style),
            Span::styled("action: ", text_style),
            action,
            Span::styled("  │  ", separator_style),
            Span::styled(page_url.to_string(), Style::default().fg(MUTED_TEXT)),
        ]);

        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

fn status_label(status: &ConnectionStatus) -> (String, ratatui::style::Color) {
    match status {
        ConnectionStatus::Connecting => ("Connecting".to_string(), STATUS_WARN),
        ConnectionStatus::Open => ("Connected".to_string(), STATUS_OK),
        ConnectionStatus::Closed { reason: Some(reason) } => {
            (format!("Disconnected ({reason})"), STATUS_ERROR)
        }
        ConnectionStatus::Closed { reason: None } => ("Disconnected".to_string(), STATUS_ERROR),
    }
}
