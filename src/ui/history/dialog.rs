use std::time::SystemTime;

use chrono::{DateTime, Local};
use ratatui::layout::Alignment;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::session::{Direction, HistoryEntry};
use crate::ui::layout::centered_rect_by_size;
use crate::ui::theme::{ACCENT, HEADER_TEXT, MUTED_TEXT, POPUP_BORDER, STATUS_OK};

use super::reducer::MAX_VISIBLE_ROWS;
use super::state::HistoryDialogState;

const DIALOG_WIDTH: u16 = 100;

pub fn render_history_dialog(frame: &mut Frame, state: &HistoryDialogState, entries: &[HistoryEntry]) {
    if !state.is_visible() {
        return;
    }

    let area = frame.area();
    let width = DIALOG_WIDTH.min(area.width);
    let inner_width = width.saturating_sub(2) as usize;
    let first = state.first_row(entries.len());

    let mut lines: Vec<Line> = if entries.is_empty() {
        vec![Line::from(Span::styled(
            " Nothing sent or received yet",
            Style::default().fg(MUTED_TEXT),
        ))]
    } else {
        entries
            .iter()
            .skip(first)
            .take(MAX_VISIBLE_ROWS)
            .map(|entry| entry_line(entry, inner_width))
            .collect()
    };
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            " {}-{} of {}   Up/Down: Scroll  Esc/Ctrl+H: Close",
            (first + 1).min(entries.len()),
            (first + MAX_VISIBLE_ROWS).min(entries.len()),
            entries.len()
        ),
        Style::default().fg(MUTED_TEXT),
    )));

    let height = (lines.len() as u16).saturating_add(2);
    let popup = centered_rect_by_size(area, width, height);
    frame.render_widget(Clear, popup);
    let block = Block::default()
        .title(Span::styled(" Session History ", Style::default().fg(ACCENT)))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn entry_line(entry: &HistoryEntry, width: usize) -> Line<'static> {
    let (arrow, arrow_style) = match entry.direction {
        Direction::Inbound => ("←", Style::default().fg(ACCENT)),
        Direction::Outbound => ("→", Style::default().fg(STATUS_OK)),
    };
    let time = format_time(entry.timestamp);
    let kind = format!("{:<14}", entry.envelope.kind);
    let data = if entry.envelope.data.is_null() {
        String::new()
    } else {
        entry.envelope.data.to_string()
    };
    // " HH:MM:SS → kind           data"
    let used = 1 + time.len() + 3 + kind.chars().count() + 1;
    let data = truncate(&data, width.saturating_sub(used));

    Line::from(vec![
        Span::raw(" "),
        Span::styled(time, Style::default().fg(MUTED_TEXT)),
        Span::raw(" "),
        Span::styled(arrow, arrow_style),
        Span::raw(" "),
        Span::styled(kind, Style::default().fg(HEADER_TEXT)),
        Span::raw(" "),
        Span::styled(data, Style::default().fg(MUTED_TEXT)),
    ])
}

fn format_time(timestamp: SystemTime) -> String {
    DateTime::<Local>::from(timestamp).format("%H:%M:%S").to_string()
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}
