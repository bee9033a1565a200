//! Local edit buffer of an input widget.

use crate::protocol::CardBody;
use crate::ui::mvi::{Intent, Reducer, UiState};

/// Uncommitted value of one input widget.
#[derive(Debug, Clone, PartialEq)]
pub enum Draft {
    Text(String),
    Toggle(bool),
    Slider {
        value: f64,
        min: f64,
        max: f64,
        step: f64,
    },
    Files {
        paths: Vec<String>,
        /// Path being typed; comma-separated paths are split when added.
        pending: String,
    },
}

impl Default for Draft {
    fn default() -> Self {
        Draft::Text(String::new())
    }
}

impl UiState for Draft {}

impl Draft {
    /// Initial draft for an input card. `None` for display cards.
    pub fn for_card(body: &CardBody) -> Option<Self> {
        let draft = match body {
            CardBody::TextInput(_)
            | CardBody::NumberInput(_)
            | CardBody::EmailInput(_)
            | CardBody::UrlInput(_)
            | CardBody::DateInput(_) => Draft::Text(String::new()),
            CardBody::TimeInput(_) => Draft::Text("12:00".to_string()),
            CardBody::RichTextInput(card) => Draft::Text(card.initial_value.clone()),
            CardBody::TextAreaInput(card) => Draft::Text(card.initial_value.clone()),
            CardBody::BooleanInput(_) => Draft::Toggle(false),
            CardBody::SliderInput(card) => Draft::Slider {
                value: card.min,
                min: card.min,
                max: card.max,
                step: card.effective_step(),
            },
            CardBody::FileInput(_) => Draft::Files {
                paths: Vec::new(),
                pending: String::new(),
            },
            CardBody::Image(_)
            | CardBody::Heading(_)
            | CardBody::Markdown(_)
            | CardBody::Html(_)
            | CardBody::Code(_)
            | CardBody::Link(_)
            | CardBody::Metadata(_) => return None,
        };
        Some(draft)
    }

    /// Text shown in the edit line.
    pub fn display_text(&self) -> String {
        match self {
            Draft::Text(text) => text.clone(),
            Draft::Toggle(true) => "[x] yes".to_string(),
            Draft::Toggle(false) => "[ ] no".to_string(),
            Draft::Slider { value, min, max, .. } => format!("{value} ({min}..{max})"),
            Draft::Files { paths, pending } => {
                let mut parts = paths.clone();
                if !pending.is_empty() {
                    parts.push(format!("{pending}_"));
                }
                parts.join(", ")
            }
        }
    }
}

/// Edits a user can make to a draft.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftIntent {
    Insert(char),
    Backspace,
    Clear,
    Toggle,
    Increase,
    Decrease,
    /// Move the pending path(s) of a file draft into the selection.
    AddPendingFiles,
    RemoveLastFile,
}

impl Intent for DraftIntent {}

/// Draft edits. Intents that do not apply to the draft's shape are no-ops.
pub struct DraftReducer;

impl Reducer for DraftReducer {
    type State = Draft;
    type Intent = DraftIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match (state, intent) {
            (Draft::Text(mut text), DraftIntent::Insert(ch)) => {
                text.push(ch);
                Draft::Text(text)
            }
            (Draft::Text(mut text), DraftIntent::Backspace) => {
                text.pop();
                Draft::Text(text)
            }
            (Draft::Text(_), DraftIntent::Clear) => Draft::Text(String::new()),

            (Draft::Toggle(value), DraftIntent::Toggle) => Draft::Toggle(!value),
            (Draft::Toggle(_), DraftIntent::Insert('y' | 'Y')) => Draft::Toggle(true),
            (Draft::Toggle(_), DraftIntent::Insert('n' | 'N')) => Draft::Toggle(false),

            (
                Draft::Slider {
                    value,
                    min,
                    max,
                    step,
                },
                DraftIntent::Increase,
            ) => Draft::Slider {
                value: clamp(value + step, min, max),
                min,
                max,
                step,
            },
            (
                Draft::Slider {
                    value,
                    min,
                    max,
                    step,
                },
                DraftIntent::Decrease,
            ) => Draft::Slider {
                value: clamp(value - step, min, max),
                min,
                max,
                step,
            },

            (Draft::Files { paths, mut pending }, DraftIntent::Insert(ch)) => {
                pending.push(ch);
                Draft::Files { paths, pending }
            }
            (Draft::Files { paths, mut pending }, DraftIntent::Backspace) => {
                pending.pop();
                Draft::Files { paths, pending }
            }
            (Draft::Files { .. }, DraftIntent::Clear) => Draft::Files {
                paths: Vec::new(),
                pending: String::new(),
            },
            (Draft::Files { mut paths, pending }, DraftIntent::AddPendingFiles) => {
                paths.extend(
                    pending
                        .split(',')
                        .map(str::trim)
                        .filter(|path| !path.is_empty())
                        .map(str::to_string),
                );
                Draft::Files {
                    paths,
                    pending: String::new(),
                }
            }
            (Draft::Files { mut paths, pending }, DraftIntent::RemoveLastFile) => {
                paths.pop();
                Draft::Files { paths, pending }
            }

            (state, _) => state,
        }
    }
}

fn clamp(value: f64, min: f64, max: f64) -> f64 {
    // A server may send max < min; keep the lower bound in that case.
    if max < min {
        return min;
    }
    value.clamp(min, max)
}
