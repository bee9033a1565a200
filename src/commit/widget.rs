use thiserror::Error;

use crate::connection::TransportError;
use crate::protocol::{Card, CardBody, InputValue};
use crate::ui::mvi::Reducer;

use super::draft::{Draft, DraftIntent, DraftReducer};
use super::validate::{validate, ValidationError};

/// Destination of committed values.
pub trait InputSink {
    fn send_input(&mut self, value: InputValue) -> Result<(), TransportError>;
}

/// Why the last commit attempt did not go through.
#[derive(Debug, Error)]
pub enum CommitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// One input card on screen: draft, commit flag and last error.
///
/// Lives as long as its card. A committed widget is read-only.
#[derive(Debug)]
pub struct InputWidget {
    body: CardBody,
    draft: Draft,
    has_committed: bool,
    last_error: Option<CommitError>,
}

impl InputWidget {
    /// Widget for an input card; `None` for display cards.
    pub fn for_card(card: &Card) -> Option<Self> {
        let draft = Draft::for_card(&card.body)?;
        Some(Self {
            body: card.body.clone(),
            draft,
            has_committed: false,
            last_error: None,
        })
    }

    pub fn body(&self) -> &CardBody {
        &self.body
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn has_committed(&self) -> bool {
        self.has_committed
    }

    pub fn last_error(&self) -> Option<&CommitError> {
        self.last_error.as_ref()
    }

    /// Apply an edit. Ignored once committed.
    pub fn edit(&mut self, intent: DraftIntent) {
        if self.has_committed {
            return;
        }
        self.draft = DraftReducer::reduce(std::mem::take(&mut self.draft), intent);
        self.last_error = None;
    }

    /// Validate and send the draft.
    ///
    /// Returns `true` only for the call that sent a value; every later call
    /// returns `false` without touching `sink`.
    pub fn attempt_commit(&mut self, sink: &mut dyn InputSink) -> bool {
        if self.has_committed {
            return false;
        }
        // Paths still being typed count as selected.
        if let Draft::Files { pending, .. } = &self.draft {
            if !pending.trim().is_empty() {
                self.draft = DraftReducer::reduce(
                    std::mem::take(&mut self.draft),
                    DraftIntent::AddPendingFiles,
                );
            }
        }

        let value = match validate(&self.body, &self.draft) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(kind = self.body.kind().tag(), error = %err, "commit rejected");
                self.last_error = Some(err.into());
                return false;
            }
        };

        match sink.send_input(value) {
            Ok(()) => {
                self.has_committed = true;
                self.last_error = None;
                true
            }
            Err(err) => {
                tracing::warn!(kind = self.body.kind().tag(), error = %err, "commit not sent");
                self.last_error = Some(err.into());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::CardKind;
    use serde_json::json;

    #[derive(Default)]
    struct RecordingSink {
        sent: Vec<InputValue>,
        offline: bool,
    }

    impl InputSink for RecordingSink {
        fn send_input(&mut self, value: InputValue) -> Result<(), TransportError> {
            if self.offline {
                return Err(TransportError::NotConnected);
            }
            self.sent.push(value);
            Ok(())
        }
    }

    fn card(tag: &str, data: serde_json::Value) -> Card {
        let kind = CardKind::from_tag(tag).expect("registered tag");
        let body = kind.decode_body(&data).expect("payload decodes");
        Card { kind, data, body }
    }

    fn type_text(widget: &mut InputWidget, text: &str) {
        for ch in text.chars() {
            widget.edit(DraftIntent::Insert(ch));
        }
    }

    #[test]
    fn display_cards_have_no_widget() {
        assert!(InputWidget::for_card(&card("markdown", json!({"content": "x"}))).is_none());
    }

    #[test]
    fn commits_at_most_once() {
        let mut widget = InputWidget::for_card(&card("textInput", json!({"label": "Name"})))
            .expect("input widget");
        type_text(&mut widget, "Ada");
        let mut sink = RecordingSink::default();

        assert!(widget.attempt_commit(&mut sink));
        assert!(!widget.attempt_commit(&mut sink));
        assert!(!widget.attempt_commit(&mut sink));
        assert_eq!(sink.sent, vec![InputValue::Text("Ada".to_string())]);
        assert!(widget.has_committed());
    }

    #[test]
    fn committed_widget_is_read_only() {
        let mut widget =
            InputWidget::for_card(&card("textInput", json!({}))).expect("input widget");
        type_text(&mut widget, "x");
        widget.attempt_commit(&mut RecordingSink::default());
        widget.edit(DraftIntent::Insert('y'));
        assert_eq!(widget.draft(), &Draft::Text("x".to_string()));
    }

    #[test]
    fn validation_failure_keeps_widget_editable() {
        let mut widget = InputWidget::for_card(&card("emailInput", json!({"required": true})))
            .expect("input widget");
        type_text(&mut widget, "not-an-email");
        let mut sink = RecordingSink::default();

        assert!(!widget.attempt_commit(&mut sink));
        assert!(sink.sent.is_empty());
        assert!(matches!(
            widget.last_error(),
            Some(CommitError::Validation(ValidationError::InvalidEmail))
        ));

        widget.edit(DraftIntent::Clear);
        assert!(widget.last_error().is_none());
        type_text(&mut widget, "ada@example.com");
        assert!(widget.attempt_commit(&mut sink));
        assert_eq!(sink.sent.len(), 1);
    }

    #[test]
    fn sink_failure_does_not_mark_committed() {
        let mut widget =
            InputWidget::for_card(&card("booleanInput", json!({}))).expect("input widget");
        let mut sink = RecordingSink {
            offline: true,
            ..Default::default()
        };
        assert!(!widget.attempt_commit(&mut sink));
        assert!(!widget.has_committed());
        assert!(matches!(
            widget.last_error(),
            Some(CommitError::Transport(TransportError::NotConnected))
        ));

        sink.offline = false;
        assert!(widget.attempt_commit(&mut sink));
        assert_eq!(sink.sent, vec![InputValue::Bool(false)]);
    }

    #[test]
    fn pending_file_path_is_included_on_commit() {
        let mut widget =
            InputWidget::for_card(&card("fileInput", json!({}))).expect("input widget");
        type_text(&mut widget, "/home/ada/cv.pdf");
        let mut sink = RecordingSink::default();
        assert!(widget.attempt_commit(&mut sink));
        assert_eq!(sink.sent, vec![InputValue::Files(vec!["cv.pdf".to_string()])]);
    }

    #[test]
    fn slider_commits_starting_minimum() {
        let mut widget = InputWidget::for_card(&card(
            "sliderInput",
            json!({"min": 18, "max": 100, "step": 1}),
        ))
        .expect("input widget");
        let mut sink = RecordingSink::default();
        assert!(widget.attempt_commit(&mut sink));
        assert_eq!(sink.sent, vec![InputValue::Number(18.0)]);
    }
}
