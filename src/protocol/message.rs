use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::registry::{CardBody, CardKind};

/// Raw wire envelope: exactly a `type` tag and a `data` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
}

impl Envelope {
    pub fn new(kind: impl Into<String>, data: Value) -> Self {
        Self {
            kind: kind.into(),
            data,
        }
    }
}

/// A server-offered action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ActionInfo {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }
}

/// A renderable unit in the session's card list.
///
/// `data` is the payload exactly as received; `body` is the same payload
/// decoded into the kind's typed shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub kind: CardKind,
    pub data: Value,
    pub body: CardBody,
}

impl Card {
    pub fn is_input(&self) -> bool {
        self.kind.is_input()
    }
}

/// Messages the server sends to the client.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    /// Opaque page catalog; replaces the stored pages.
    Pages(Value),
    /// Action catalog; replaces the stored actions.
    Actions(Vec<ActionInfo>),
    Card(Card),
    /// The current action finished.
    Done,
    /// Protocol error reported by the server.
    Error(String),
    /// Well-formed envelope with a type this client does not know.
    Unrecognized { kind: String, data: Value },
}

impl InboundMessage {
    pub fn type_tag(&self) -> &str {
        match self {
            InboundMessage::Pages(_) => "pages",
            InboundMessage::Actions(_) => "actions",
            InboundMessage::Card(card) => card.kind.tag(),
            InboundMessage::Done => "done",
            InboundMessage::Error(_) => "error",
            InboundMessage::Unrecognized { kind, .. } => kind.as_str(),
        }
    }

    /// Wire envelope equivalent of this message, as recorded in history.
    pub fn envelope(&self) -> Envelope {
        let data = match self {
            InboundMessage::Pages(pages) => pages.clone(),
            InboundMessage::Actions(actions) => {
                serde_json::to_value(actions).unwrap_or(Value::Null)
            }
            InboundMessage::Card(card) => card.data.clone(),
            InboundMessage::Done => Value::Null,
            InboundMessage::Error(message) => Value::String(message.clone()),
            InboundMessage::Unrecognized { data, .. } => data.clone(),
        };
        Envelope::new(self.type_tag(), data)
    }
}

/// Value committed by an input widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Files(Vec<String>),
}

/// Messages the client sends to the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum OutboundMessage {
    /// Handshake sent when the connection opens.
    Ping,
    /// Start the named action.
    Start(String),
    /// Committed widget value.
    Input(InputValue),
}

impl OutboundMessage {
    pub fn type_tag(&self) -> &'static str {
        match self {
            OutboundMessage::Ping => "ping",
            OutboundMessage::Start(_) => "start",
            OutboundMessage::Input(_) => "input",
        }
    }

    pub fn envelope(&self) -> Envelope {
        let data = match self {
            OutboundMessage::Ping => Value::Null,
            OutboundMessage::Start(name) => Value::String(name.clone()),
            OutboundMessage::Input(value) => serde_json::to_value(value).unwrap_or(Value::Null),
        };
        Envelope::new(self.type_tag(), data)
    }
}
