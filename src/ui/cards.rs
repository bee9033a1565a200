//! Text rendering of cards. Markdown, HTML and code are shown as plain text.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::commit::{CommitError, Draft, InputWidget};
use crate::protocol::cards::{InputBase, LinkStyle, MetadataCard};
use crate::protocol::{Card, CardBody};
use crate::ui::theme::{
    ACCENT, ACTIVE_HIGHLIGHT, CODE_TEXT, HEADER_TEXT, MUTED_TEXT, STATUS_ERROR, STATUS_OK,
};

/// Lines for one card. `widget` is the card's input state, if it takes input.
pub fn card_lines(card: &Card, widget: Option<&InputWidget>, focused: bool, width: u16) -> Vec<Line<'static>> {
    let width = usize::from(width.max(8));
    let text = Style::default().fg(HEADER_TEXT);
    match &card.body {
        CardBody::Image(image) => {
            let alt = if image.alt.is_empty() { "image" } else { image.alt.as_str() };
            vec![Line::from(vec![
                Span::styled(format!("[{alt}] "), Style::default().fg(ACCENT)),
                Span::styled(image.url.clone(), Style::default().fg(MUTED_TEXT)),
            ])]
        }
        CardBody::Heading(heading) => {
            let marker = "#".repeat(usize::from(heading.level.clamp(1, 6)));
            let style = text.add_modifier(Modifier::BOLD);
            wrap(&heading.text, width.saturating_sub(marker.len() + 1))
                .into_iter()
                .map(|row| Line::from(vec![
                    Span::styled(format!("{marker} "), Style::default().fg(ACCENT)),
                    Span::styled(row, style),
                ]))
                .collect()
        }
        CardBody::Markdown(markdown) => plain(&markdown.content, width, text),
        CardBody::Html(html) => plain(&html.content, width, text),
        CardBody::Code(code) => {
            let style = Style::default().fg(CODE_TEXT);
            let mut lines = vec![Line::from(Span::styled(
                format!("```{}", code.language),
                Style::default().fg(MUTED_TEXT),
            ))];
            lines.extend(code.code.lines().map(|row| Line::from(Span::styled(row.to_string(), style))));
            lines.push(Line::from(Span::styled("```", Style::default().fg(MUTED_TEXT))));
            lines
        }
        CardBody::Link(link) => {
            let color = match link.link_style() {
                LinkStyle::Default => ACCENT,
                LinkStyle::Primary => STATUS_OK,
                LinkStyle::Danger => STATUS_ERROR,
            };
            vec![Line::from(vec![
                Span::styled(
                    format!("[ {} ]", link.text),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(link.url.clone(), Style::default().fg(MUTED_TEXT).add_modifier(Modifier::UNDERLINED)),
            ])]
        }
        CardBody::Metadata(metadata) => metadata_lines(metadata),
        input => match (input_base(input), widget) {
            (Some(base), Some(widget)) => input_lines(base, widget, focused, width),
            _ => Vec::new(),
        },
    }
}

fn plain(content: &str, width: usize, style: Style) -> Vec<Line<'static>> {
    content
        .lines()
        .flat_map(|row| wrap(row, width))
        .map(|row| Line::from(Span::styled(row, style)))
        .collect()
}

fn metadata_lines(metadata: &MetadataCard) -> Vec<Line<'static>> {
    let label_style = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::BOLD);
    let value_style = Style::default().fg(HEADER_TEXT);
    let label_width = if metadata.is_table() {
        metadata
            .items
            .iter()
            .map(|item| item.label.chars().count())
            .max()
            .unwrap_or(0)
    } else {
        0
    };
    metadata
        .items
        .iter()
        .map(|item| {
            let label = if metadata.is_table() {
                format!("{:<label_width$}  ", item.label)
            } else {
                format!("{}: ", item.label)
            };
            Line::from(vec![
                Span::styled(label, label_style),
                Span::styled(item.value.clone(), value_style),
            ])
        })
        .collect()
}

fn input_base(body: &CardBody) -> Option<&InputBase> {
    match body {
        CardBody::TextInput(card) => Some(&card.base),
        CardBody::NumberInput(card) => Some(&card.base),
        CardBody::BooleanInput(card) => Some(&card.base),
        CardBody::EmailInput(card) => Some(&card.base),
        CardBody::UrlInput(card) => Some(&card.base),
        CardBody::DateInput(card) => Some(&card.base),
        CardBody::TimeInput(card) => Some(&card.base),
        CardBody::SliderInput(card) => Some(&card.base),
        CardBody::FileInput(card) => Some(&card.base),
        CardBody::RichTextInput(card) => Some(&card.base),
        CardBody::TextAreaInput(card) => Some(&card.base),
        _ => None,
    }
}

/// Placeholder shown for an empty draft when the card gives none.
fn format_hint(body: &CardBody) -> &'static str {
    match body {
        CardBody::DateInput(_) => "YYYY-MM-DD",
        CardBody::TimeInput(_) => "HH:MM",
        CardBody::FileInput(card) if card.multiple => "path, path, ...",
        CardBody::FileInput(_) => "path to file",
        _ => "",
    }
}

fn input_lines(base: &InputBase, widget: &InputWidget, focused: bool, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let mut label = vec![Span::styled(
        if base.label.is_empty() { "Input".to_string() } else { base.label.clone() },
        Style::default().fg(HEADER_TEXT).add_modifier(Modifier::BOLD),
    )];
    if base.required {
        label.push(Span::styled(" *", Style::default().fg(STATUS_ERROR)));
    }
    lines.push(Line::from(label));

    if widget.has_committed() {
        lines.push(Line::from(vec![
            Span::styled("  ✓ Submitted: ", Style::default().fg(STATUS_OK)),
            Span::styled(widget.draft().display_text(), Style::default().fg(MUTED_TEXT)),
        ]));
    } else {
        let draft = widget.draft().display_text();
        let empty = draft.is_empty();
        let (value, value_style) = if empty {
            let hint = if base.placeholder.is_empty() {
                format_hint(widget.body()).to_string()
            } else {
                base.placeholder.clone()
            };
            (hint, Style::default().fg(MUTED_TEXT).add_modifier(Modifier::ITALIC))
        } else {
            (draft, Style::default().fg(HEADER_TEXT))
        };
        let (marker, row_style) = if focused {
            ("› ", Style::default().bg(ACTIVE_HIGHLIGHT))
        } else {
            ("  ", Style::default())
        };
        let mut value_rows: Vec<String> = value.split('\n').map(str::to_string).collect();
        if focused && !matches!(widget.draft(), Draft::Toggle(_) | Draft::Slider { .. }) {
            if let Some(last) = value_rows.last_mut() {
                if empty {
                    last.clear();
                }
                last.push('▏');
            }
        }
        for row in value_rows {
            for piece in wrap(&row, width.saturating_sub(2)) {
                lines.push(
                    Line::from(vec![
                        Span::styled(marker, Style::default().fg(ACCENT)),
                        Span::styled(piece, value_style),
                    ])
                    .style(row_style),
                );
            }
        }
    }

    if !base.help_text.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  {}", base.help_text),
            Style::default().fg(MUTED_TEXT),
        )));
    }
    if let Some(error) = widget.last_error() {
        let message = match error {
            CommitError::Validation(err) => err.to_string(),
            CommitError::Transport(err) => format!("Not sent: {err}"),
        };
        lines.push(Line::from(Span::styled(
            format!("  ! {message}"),
            Style::default().fg(STATUS_ERROR),
        )));
    }
    lines
}

/// Greedy word wrap on char counts. Words longer than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split(' ') {
        let mut word: String = word.to_string();
        let mut word_len = word.chars().count();
        while word_len > width {
            if current_len > 0 {
                rows.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let head: String = word.chars().take(width).collect();
            word = word.chars().skip(width).collect();
            word_len -= width;
            rows.push(head);
        }
        let needed = if current_len == 0 { word_len } else { current_len + 1 + word_len };
        if needed > width {
            rows.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(&word);
        current_len += word_len;
    }
    rows.push(current);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::CardKind;
    use serde_json::json;

    fn card(tag: &str, data: serde_json::Value) -> Card {
        let kind = CardKind::from_tag(tag).expect("registered tag");
        let body = kind.decode_body(&data).expect("payload decodes");
        Card { kind, data, body }
    }

    fn text_of(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn wrap_breaks_on_spaces_and_long_words() {
        assert_eq!(wrap("hello brave new world", 11), vec!["hello brave", "new world"]);
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap("", 5), vec![""]);
    }

    #[test]
    fn heading_uses_level_marker() {
        let lines = card_lines(&card("display", json!({"text": "Welcome", "level": 2})), None, false, 40);
        assert_eq!(text_of(&lines), vec!["## Welcome"]);
    }

    #[test]
    fn table_metadata_aligns_labels() {
        let data = json!({"layout": "table", "items": [
            {"label": "Name", "value": "Ada"},
            {"label": "Language", "value": "Rust"}
        ]});
        let lines = card_lines(&card("metadata", data), None, false, 40);
        assert_eq!(text_of(&lines), vec!["Name      Ada", "Language  Rust"]);
    }

    #[test]
    fn input_shows_label_placeholder_and_help() {
        let input = card(
            "textInput",
            json!({"label": "Name", "placeholder": "Your name", "helpText": "As on your ID", "required": true}),
        );
        let widget = InputWidget::for_card(&input);
        let lines = card_lines(&input, widget.as_ref(), false, 40);
        assert_eq!(
            text_of(&lines),
            vec!["Name *", "  Your name", "  As on your ID"]
        );
    }

    #[test]
    fn display_card_without_widget_still_renders() {
        let lines = card_lines(&card("code", json!({"code": "fn main() {}", "language": "rust"})), None, false, 40);
        assert_eq!(text_of(&lines), vec!["```rust", "fn main() {}", "```"]);
    }
}
