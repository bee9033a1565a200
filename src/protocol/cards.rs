//! Typed payloads carried in the `data` field of card messages.
//!
//! Field names follow the server's JSON (camelCase). Every field has a
//! default so that partially filled payloads still decode. A present field
//! with the wrong JSON type fails a strict decode; see
//! [`CardKind::decode_body_lenient`](super::CardKind::decode_body_lenient).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageCard {
    pub url: String,
    pub alt: String,
    pub size: String,
}

/// Heading text; the server calls this kind `display`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingCard {
    pub text: String,
    pub level: u8,
}

impl Default for HeadingCard {
    fn default() -> Self {
        Self {
            text: String::new(),
            level: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownCard {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlCard {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeCard {
    pub code: String,
    pub language: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkStyle {
    #[default]
    Default,
    Primary,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkCard {
    pub text: String,
    pub url: String,
    #[serde(rename = "type")]
    pub style: String,
}

impl LinkCard {
    /// Unknown styles fall back to the default look.
    pub fn link_style(&self) -> LinkStyle {
        match self.style.as_str() {
            "primary" => LinkStyle::Primary,
            "danger" => LinkStyle::Danger,
            _ => LinkStyle::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataItem {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataCard {
    pub items: Vec<MetadataItem>,
    pub layout: String,
}

impl MetadataCard {
    pub fn is_table(&self) -> bool {
        self.layout == "table"
    }
}

/// Fields shared by every input card.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InputBase {
    pub label: String,
    pub help_text: String,
    pub placeholder: String,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextInputCard {
    #[serde(flatten)]
    pub base: InputBase,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

/// Bounds apply only when sent as lowercase `min`/`max`. The server's
/// untagged `Min`/`Max` are always present (zero when unset) and are ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberInputCard {
    #[serde(flatten)]
    pub base: InputBase,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BooleanInputCard {
    #[serde(flatten)]
    pub base: InputBase,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailInputCard {
    #[serde(flatten)]
    pub base: InputBase,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlInputCard {
    #[serde(flatten)]
    pub base: InputBase,
}

/// Bounds are ISO 8601 dates (`YYYY-MM-DD`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DateInputCard {
    #[serde(flatten)]
    pub base: InputBase,
    pub min: Option<String>,
    pub max: Option<String>,
}

/// Bounds are `HH:MM`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeInputCard {
    #[serde(flatten)]
    pub base: InputBase,
    pub min: Option<String>,
    pub max: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderInputCard {
    #[serde(flatten)]
    pub base: InputBase,
    pub min: f64,
    pub max: f64,
    pub step: Option<f64>,
}

impl SliderInputCard {
    pub fn effective_step(&self) -> f64 {
        match self.step {
            Some(step) if step > 0.0 => step,
            _ => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileInputCard {
    #[serde(flatten)]
    pub base: InputBase,
    pub accept: String,
    pub multiple: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RichTextInputCard {
    #[serde(flatten)]
    pub base: InputBase,
    pub initial_value: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextAreaInputCard {
    #[serde(flatten)]
    pub base: InputBase,
    pub initial_value: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn heading_level_defaults_to_one() {
        let card: HeadingCard = serde_json::from_value(json!({"text": "Hi"})).unwrap();
        assert_eq!(card.level, 1);
        assert_eq!(card.text, "Hi");
    }

    #[test]
    fn input_base_reads_camel_case_fields() {
        let card: TextInputCard = serde_json::from_value(json!({
            "label": "Name",
            "helpText": "Your full name",
            "required": true,
            "maxLength": 12
        }))
        .unwrap();
        assert_eq!(card.base.label, "Name");
        assert_eq!(card.base.help_text, "Your full name");
        assert!(card.base.required);
        assert_eq!(card.max_length, Some(12));
        assert_eq!(card.min_length, None);
    }

    #[test]
    fn number_go_field_names_are_not_bounds() {
        let card: NumberInputCard = serde_json::from_value(
            json!({"label": "How many seconds until launch?", "Min": 0, "Max": 0}),
        )
        .unwrap();
        assert_eq!(card.min, None);
        assert_eq!(card.max, None);

        let card: NumberInputCard =
            serde_json::from_value(json!({"label": "Age", "min": 0, "max": 120})).unwrap();
        assert_eq!(card.min, Some(0.0));
        assert_eq!(card.max, Some(120.0));
    }

    #[test]
    fn unknown_link_style_falls_back_to_default() {
        let card: LinkCard =
            serde_json::from_value(json!({"text": "Go", "url": "https://go.dev", "type": "weird"}))
                .unwrap();
        assert_eq!(card.link_style(), LinkStyle::Default);

        let card: LinkCard = serde_json::from_value(json!({"type": "danger"})).unwrap();
        assert_eq!(card.link_style(), LinkStyle::Danger);
    }

    #[test]
    fn slider_step_falls_back_to_one() {
        let card = SliderInputCard {
            step: Some(0.0),
            ..Default::default()
        };
        assert_eq!(card.effective_step(), 1.0);

        let card = SliderInputCard {
            step: Some(5.0),
            ..Default::default()
        };
        assert_eq!(card.effective_step(), 5.0);
    }

    #[test]
    fn wrong_field_type_is_an_error() {
        let result: Result<MarkdownCard, _> = serde_json::from_value(json!({"content": 42}));
        assert!(result.is_err());
    }
}
