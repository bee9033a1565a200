use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};
use ratatui::Frame;

use crate::ui::app::App;
use crate::ui::cards::{card_lines, wrap};
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::history::render_history_dialog;
use crate::ui::layout::layout_regions;
use crate::ui::theme::{
    ACCENT, ACTIVE_HIGHLIGHT, HEADER_TEXT, MUTED_TEXT, STATUS_ERROR, STATUS_OK, STATUS_WARN,
};

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);

    frame.render_widget(Header::new().widget(app.page_url(), app.session()), header);

    frame.render_widget(Clear, body);
    let view = body_lines(app, body.width);
    let scroll = scroll_offset(view.focus_row, view.lines.len(), body.height);
    frame.render_widget(Paragraph::new(view.lines).scroll((scroll, 0)), body);

    frame.render_widget(Footer::new().widget(app, footer), footer);

    render_history_dialog(frame, app.history_dialog(), &app.session().history);
}

/// Body content plus the row the view should keep visible.
pub struct BodyView {
    pub lines: Vec<Line<'static>>,
    pub focus_row: Option<usize>,
}

pub fn body_lines(app: &App, width: u16) -> BodyView {
    let session = app.session();
    let text_width = usize::from(width.saturating_sub(4).max(8));
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut focus_row = None;

    for error in app.banner_errors() {
        for row in wrap(&format!("⚠ {error}"), text_width) {
            lines.push(Line::from(Span::styled(
                format!(" {row}"),
                Style::default().fg(STATUS_ERROR).add_modifier(Modifier::BOLD),
            )));
        }
    }
    if let Some(notice) = app.notice() {
        lines.push(Line::from(Span::styled(
            format!(" {notice}"),
            Style::default().fg(STATUS_WARN),
        )));
    }
    if !lines.is_empty() {
        lines.push(Line::from(""));
    }

    for (index, card) in session.cards.iter().enumerate() {
        let focused = app.focused() == Some(index);
        if focused {
            focus_row = Some(lines.len());
        }
        lines.extend(
            card_lines(card, app.widget(index), focused, width.saturating_sub(2))
                .into_iter()
                .map(indent),
        );
        lines.push(Line::from(""));
    }

    if app.is_completed() {
        lines.push(Line::from(Span::styled(
            " ✓ Action complete",
            Style::default().fg(STATUS_OK).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }

    if app.shows_action_picker() {
        if focus_row.is_none() {
            focus_row = Some(lines.len());
        }
        lines.push(Line::from(Span::styled(
            " Actions",
            Style::default().fg(HEADER_TEXT).add_modifier(Modifier::BOLD),
        )));
        for (index, action) in session.actions.iter().enumerate() {
            let selected = index == app.action_selection();
            let marker = if selected { " › " } else { "   " };
            let mut spans = vec![
                Span::styled(marker, Style::default().fg(ACCENT)),
                Span::styled(action.name.clone(), Style::default().fg(HEADER_TEXT)),
            ];
            if let Some(description) = action.description.as_deref().filter(|d| !d.is_empty()) {
                spans.push(Span::styled(
                    format!("  {description}"),
                    Style::default().fg(MUTED_TEXT),
                ));
            }
            let mut line = Line::from(spans);
            if selected {
                line = line.style(Style::default().bg(ACTIVE_HIGHLIGHT));
            }
            lines.push(line);
        }
    } else if session.cards.is_empty() && session.is_idle() {
        let waiting = if app.is_connected() {
            " Waiting for the server..."
        } else {
            " Not connected."
        };
        lines.push(Line::from(Span::styled(waiting, Style::default().fg(MUTED_TEXT))));
    }

    BodyView { lines, focus_row }
}

fn indent(line: Line<'static>) -> Line<'static> {
    let style = line.style;
    let mut spans = vec![Span::raw(" ")];
    spans.extend(line.spans);
    Line::from(spans).style(style)
}

/// Scroll so that `focus_row` is visible, preferring to show the tail.
pub fn scroll_offset(focus_row: Option<usize>, total: usize, height: u16) -> u16 {
    let height = usize::from(height);
    if height == 0 || total <= height {
        return 0;
    }
    let tail = total - height;
    let offset = match focus_row {
        Some(row) if row < tail => row.saturating_sub(1),
        _ => tail,
    };
    u16::try_from(offset).unwrap_or(u16::MAX)
}
