//! Wire codec: JSON text frames to typed messages and back.

use serde_json::Value;
use thiserror::Error;

use super::message::{ActionInfo, Card, Envelope, InboundMessage, OutboundMessage};
use super::registry::CardKind;

/// A frame that could not be turned into an [`InboundMessage`].
///
/// Only the envelope itself can fail: once `type` is known, payload fields
/// that do not fit are skipped with a warning instead of dropping the frame.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("frame is not a valid envelope: {source}")]
    Envelope {
        #[source]
        source: serde_json::Error,
    },
}

/// Decode one raw text frame.
pub fn decode(raw: &str) -> Result<InboundMessage, DecodeError> {
    let envelope: Envelope =
        serde_json::from_str(raw).map_err(|source| DecodeError::Envelope { source })?;
    decode_envelope(envelope)
}

/// Interpret an already parsed envelope.
pub fn decode_envelope(envelope: Envelope) -> Result<InboundMessage, DecodeError> {
    let Envelope { kind, data } = envelope;
    if let Some(card_kind) = CardKind::from_tag(&kind) {
        let (body, skipped) = card_kind.decode_body_lenient(&data);
        if !skipped.is_empty() {
            tracing::warn!(kind = %kind, fields = ?skipped, "ignoring card fields with unexpected types");
        }
        return Ok(InboundMessage::Card(Card {
            kind: card_kind,
            data,
            body,
        }));
    }

    let message = match kind.as_str() {
        "pages" => InboundMessage::Pages(data),
        "actions" => InboundMessage::Actions(decode_actions(data)),
        "done" => InboundMessage::Done,
        "error" => InboundMessage::Error(error_text(data)),
        _ => InboundMessage::Unrecognized {
            kind: kind.clone(),
            data,
        },
    };
    Ok(message)
}

/// Serialize an outbound message to its text frame.
pub fn encode(message: &OutboundMessage) -> String {
    // Serializing these types cannot fail: every variant maps to plain JSON.
    serde_json::to_string(message).unwrap_or_default()
}

/// Entries that are not valid actions are skipped; a payload that is not a
/// list yields no actions.
fn decode_actions(data: Value) -> Vec<ActionInfo> {
    let entries = match data {
        Value::Array(entries) => entries,
        Value::Null => return Vec::new(),
        other => {
            tracing::warn!(payload = %other, "actions payload is not a list");
            return Vec::new();
        }
    };
    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(action) => Some(action),
            Err(err) => {
                tracing::warn!(error = %err, "skipping invalid action entry");
                None
            }
        })
        .collect()
}

fn error_text(data: Value) -> String {
    match data {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
