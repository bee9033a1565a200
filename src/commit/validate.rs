//! Per-kind validation of a draft into the value sent with `input`.

use std::path::Path;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use thiserror::Error;

use crate::protocol::cards::{DateInputCard, InputBase, NumberInputCard, TextInputCard, TimeInputCard};
use crate::protocol::{CardBody, InputValue};

use super::draft::Draft;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

static EMAIL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

static URL_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^(https?://)?([\da-z.-]+)\.([a-z.]{2,6})([/\w .-]*)*/?$").ok()
});

/// Reasons a draft cannot be committed. Display text is shown under the widget.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("This field is required")]
    Required,

    #[error("Enter at least {min} characters")]
    TooShort { min: usize },

    #[error("Enter at most {max} characters")]
    TooLong { max: usize },

    #[error("Please enter a valid number")]
    NotANumber,

    #[error("Please enter a whole number")]
    NotAWholeNumber,

    #[error("Value must be at least {min}")]
    BelowMinimum { min: String },

    #[error("Value must be at most {max}")]
    AboveMaximum { max: String },

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please enter a valid URL")]
    InvalidUrl,

    #[error("Please select a date")]
    MissingDate,

    #[error("Dates look like YYYY-MM-DD")]
    InvalidDate,

    #[error("Times look like HH:MM")]
    InvalidTime,

    #[error("Please choose a file")]
    NoFiles,

    #[error("Only one file can be uploaded")]
    TooManyFiles,

    #[error("{0} cards do not take input")]
    NotAnInput(&'static str),

    #[error("Draft does not match a {0} card")]
    DraftMismatch(&'static str),
}

/// Check `draft` against the rules of `body` and build the wire value.
pub fn validate(body: &CardBody, draft: &Draft) -> Result<InputValue, ValidationError> {
    let tag = body.kind().tag();
    match (body, draft) {
        (CardBody::TextInput(card), Draft::Text(text)) => text_value(card, text),
        (CardBody::NumberInput(card), Draft::Text(text)) => number_value(card, text),
        (CardBody::BooleanInput(_), Draft::Toggle(value)) => Ok(InputValue::Bool(*value)),
        (CardBody::EmailInput(card), Draft::Text(text)) => {
            patterned_value(&card.base, text, &EMAIL_RE, ValidationError::InvalidEmail)
        }
        (CardBody::UrlInput(card), Draft::Text(text)) => {
            patterned_value(&card.base, text, &URL_RE, ValidationError::InvalidUrl)
        }
        (CardBody::DateInput(card), Draft::Text(text)) => date_value(card, text),
        (CardBody::TimeInput(card), Draft::Text(text)) => time_value(card, text),
        (CardBody::SliderInput(_), Draft::Slider { value, .. }) => Ok(InputValue::Number(*value)),
        (CardBody::FileInput(card), Draft::Files { paths, .. }) => {
            if paths.is_empty() {
                return Err(ValidationError::NoFiles);
            }
            if paths.len() > 1 && !card.multiple {
                return Err(ValidationError::TooManyFiles);
            }
            Ok(InputValue::Files(paths.iter().map(|p| file_name(p)).collect()))
        }
        (CardBody::RichTextInput(card), Draft::Text(text)) => free_text(&card.base, text),
        (CardBody::TextAreaInput(card), Draft::Text(text)) => free_text(&card.base, text),
        (body, _) if !body.kind().is_input() => Err(ValidationError::NotAnInput(tag)),
        _ => Err(ValidationError::DraftMismatch(tag)),
    }
}

fn text_value(card: &TextInputCard, text: &str) -> Result<InputValue, ValidationError> {
    if text.trim().is_empty() {
        if card.base.required {
            return Err(ValidationError::Required);
        }
        return Ok(InputValue::Text(String::new()));
    }
    let len = text.chars().count();
    if let Some(min) = card.min_length {
        if len < min {
            return Err(ValidationError::TooShort { min });
        }
    }
    if let Some(max) = card.max_length {
        if len > max {
            return Err(ValidationError::TooLong { max });
        }
    }
    Ok(InputValue::Text(text.to_string()))
}

/// Numbers go out as the typed text; the server parses them as integers.
fn number_value(card: &NumberInputCard, text: &str) -> Result<InputValue, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(if card.base.required {
            ValidationError::Required
        } else {
            ValidationError::NotANumber
        });
    }
    let number = match trimmed.parse::<i64>() {
        Ok(whole) => whole as f64,
        Err(_) => {
            return Err(match trimmed.parse::<f64>() {
                Ok(value) if value.is_finite() => ValidationError::NotAWholeNumber,
                _ => ValidationError::NotANumber,
            });
        }
    };
    if let Some(min) = card.min {
        if number < min {
            return Err(ValidationError::BelowMinimum { min: min.to_string() });
        }
    }
    if let Some(max) = card.max {
        if number > max {
            return Err(ValidationError::AboveMaximum { max: max.to_string() });
        }
    }
    Ok(InputValue::Text(trimmed.to_string()))
}

fn patterned_value(
    base: &InputBase,
    text: &str,
    pattern: &LazyLock<Option<Regex>>,
    invalid: ValidationError,
) -> Result<InputValue, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() && !base.required {
        return Ok(InputValue::Text(String::new()));
    }
    match pattern.as_ref() {
        Some(re) if re.is_match(trimmed) => Ok(InputValue::Text(trimmed.to_string())),
        _ => Err(invalid),
    }
}

fn date_value(card: &DateInputCard, text: &str) -> Result<InputValue, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingDate);
    }
    let date =
        NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| ValidationError::InvalidDate)?;
    if let Some(min) = parse_bound(card.min.as_deref(), |s| NaiveDate::parse_from_str(s, DATE_FORMAT)) {
        if date < min {
            return Err(ValidationError::BelowMinimum {
                min: min.format(DATE_FORMAT).to_string(),
            });
        }
    }
    if let Some(max) = parse_bound(card.max.as_deref(), |s| NaiveDate::parse_from_str(s, DATE_FORMAT)) {
        if date > max {
            return Err(ValidationError::AboveMaximum {
                max: max.format(DATE_FORMAT).to_string(),
            });
        }
    }
    Ok(InputValue::Text(date.format(DATE_FORMAT).to_string()))
}

fn time_value(card: &TimeInputCard, text: &str) -> Result<InputValue, ValidationError> {
    let time = NaiveTime::parse_from_str(text.trim(), TIME_FORMAT)
        .map_err(|_| ValidationError::InvalidTime)?;
    if let Some(min) = parse_bound(card.min.as_deref(), |s| NaiveTime::parse_from_str(s, TIME_FORMAT)) {
        if time < min {
            return Err(ValidationError::BelowMinimum {
                min: min.format(TIME_FORMAT).to_string(),
            });
        }
    }
    if let Some(max) = parse_bound(card.max.as_deref(), |s| NaiveTime::parse_from_str(s, TIME_FORMAT)) {
        if time > max {
            return Err(ValidationError::AboveMaximum {
                max: max.format(TIME_FORMAT).to_string(),
            });
        }
    }
    Ok(InputValue::Text(time.format(TIME_FORMAT).to_string()))
}

fn free_text(base: &InputBase, text: &str) -> Result<InputValue, ValidationError> {
    if base.required && text.trim().is_empty() {
        return Err(ValidationError::Required);
    }
    Ok(InputValue::Text(text.to_string()))
}

/// Unparseable bounds from the server are ignored.
fn parse_bound<T, E: std::fmt::Display>(
    raw: Option<&str>,
    parse: impl Fn(&str) -> Result<T, E>,
) -> Option<T> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match parse(raw) {
        Ok(bound) => Some(bound),
        Err(err) => {
            tracing::debug!(bound = raw, error = %err, "ignoring unparseable input bound");
            None
        }
    }
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}
