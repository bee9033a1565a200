//! Card registry: the single table that maps a wire type tag to a card kind
//! and its typed payload.
//!
//! Adding a card kind means adding one row to the `card_registry!` invocation
//! below (plus its payload struct in `cards.rs`). `CardKind`, `CardBody`,
//! tag lookup and decoding are generated from that row.

use serde_json::Value;

use super::cards::{
    BooleanInputCard, CodeCard, DateInputCard, EmailInputCard, FileInputCard, HeadingCard,
    HtmlCard, ImageCard, LinkCard, MarkdownCard, MetadataCard, NumberInputCard,
    RichTextInputCard, SliderInputCard, TextAreaInputCard, TextInputCard, TimeInputCard,
    UrlInputCard,
};

/// Whether a card only displays content or also collects a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardRole {
    Display,
    Input,
}

macro_rules! card_registry {
    ($( $variant:ident => $tag:literal, $payload:ty, $role:ident; )+) => {
        /// Every card kind the client knows how to render.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum CardKind {
            $( $variant, )+
        }

        /// A card payload decoded into its kind-specific shape.
        #[derive(Debug, Clone, PartialEq)]
        pub enum CardBody {
            $( $variant($payload), )+
        }

        /// `(tag, kind, role)` for every registered kind, in declaration order.
        pub const REGISTRY: &[(&str, CardKind, CardRole)] = &[
            $( ($tag, CardKind::$variant, CardRole::$role), )+
        ];

        impl CardKind {
            /// Wire tag for this kind.
            pub fn tag(self) -> &'static str {
                match self {
                    $( CardKind::$variant => $tag, )+
                }
            }

            pub fn role(self) -> CardRole {
                match self {
                    $( CardKind::$variant => CardRole::$role, )+
                }
            }

            /// Parse `data` into this kind's payload.
            pub fn decode_body(self, data: &Value) -> Result<CardBody, serde_json::Error> {
                // A missing payload is treated as an empty object so that
                // all-default cards still decode.
                let data = if data.is_null() {
                    Value::Object(serde_json::Map::new())
                } else {
                    data.clone()
                };
                match self {
                    $( CardKind::$variant => {
                        serde_json::from_value::<$payload>(data).map(CardBody::$variant)
                    } )+
                }
            }
        }

        impl CardBody {
            /// The all-default payload for `kind`.
            pub fn empty(kind: CardKind) -> Self {
                match kind {
                    $( CardKind::$variant => CardBody::$variant(<$payload>::default()), )+
                }
            }

            pub fn kind(&self) -> CardKind {
                match self {
                    $( CardBody::$variant(_) => CardKind::$variant, )+
                }
            }
        }
    };
}

card_registry! {
    Image => "image", ImageCard, Display;
    Heading => "display", HeadingCard, Display;
    Markdown => "markdown", MarkdownCard, Display;
    Html => "html", HtmlCard, Display;
    Code => "code", CodeCard, Display;
    Link => "link", LinkCard, Display;
    Metadata => "metadata", MetadataCard, Display;
    TextInput => "textInput", TextInputCard, Input;
    NumberInput => "numberInput", NumberInputCard, Input;
    BooleanInput => "booleanInput", BooleanInputCard, Input;
    EmailInput => "emailInput", EmailInputCard, Input;
    UrlInput => "urlInput", UrlInputCard, Input;
    DateInput => "dateInput", DateInputCard, Input;
    TimeInput => "timeInput", TimeInputCard, Input;
    SliderInput => "sliderInput", SliderInputCard, Input;
    FileInput => "fileInput", FileInputCard, Input;
    RichTextInput => "richTextInput", RichTextInputCard, Input;
    TextAreaInput => "textAreaInput", TextAreaInputCard, Input;
}

impl CardKind {
    /// Look up a kind by its wire tag. Tags are case-sensitive.
    pub fn from_tag(tag: &str) -> Option<Self> {
        REGISTRY
            .iter()
            .find(|(candidate, _, _)| *candidate == tag)
            .map(|(_, kind, _)| *kind)
    }

    pub fn is_input(self) -> bool {
        self.role() == CardRole::Input
    }

    /// Like [`decode_body`](Self::decode_body), but never fails.
    ///
    /// Fields whose JSON type does not fit the payload are left at their
    /// defaults and their names returned. A payload that is not an object
    /// yields the empty body and the name `data`.
    pub fn decode_body_lenient(self, data: &Value) -> (CardBody, Vec<String>) {
        if let Ok(body) = self.decode_body(data) {
            return (body, Vec::new());
        }
        let Value::Object(fields) = data else {
            return (CardBody::empty(self), vec!["data".to_string()]);
        };

        let mut kept = serde_json::Map::new();
        let mut body = CardBody::empty(self);
        let mut skipped = Vec::new();
        for (key, value) in fields {
            kept.insert(key.clone(), value.clone());
            match self.decode_body(&Value::Object(kept.clone())) {
                Ok(decoded) => body = decoded,
                Err(_) => {
                    kept.remove(key);
                    skipped.push(key.clone());
                }
            }
        }
        (body, skipped)
    }
}

/// True when `tag` names a registered card kind.
pub fn is_card_tag(tag: &str) -> bool {
    CardKind::from_tag(tag).is_some()
}
