//! Wire protocol: the `Request`/`Response` envelope and the closed set of
//! component tags.
//!
//! `component` travels as a plain string rather than a typed enum so an
//! unrecognized tag still deserializes; the server answers it with a
//! uniform `Response.error` instead of rejecting the request outright.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentTag {
    Input,
    Confirm,
    Choose,
    Filter,
    File,
    Write,
    Textarea,
    Spin,
    Pager,
    Table,
}

impl ComponentTag {
    pub const ALL: [ComponentTag; 10] = [
        ComponentTag::Input,
        ComponentTag::Confirm,
        ComponentTag::Choose,
        ComponentTag::Filter,
        ComponentTag::File,
        ComponentTag::Write,
        ComponentTag::Textarea,
        ComponentTag::Spin,
        ComponentTag::Pager,
        ComponentTag::Table,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentTag::Input => "input",
            ComponentTag::Confirm => "confirm",
            ComponentTag::Choose => "choose",
            ComponentTag::Filter => "filter",
            ComponentTag::File => "file",
            ComponentTag::Write => "write",
            ComponentTag::Textarea => "textarea",
            ComponentTag::Spin => "spin",
            ComponentTag::Pager => "pager",
            ComponentTag::Table => "table",
        }
    }

    /// Whether `value` (matched case-sensitively) names a known tag.
    pub fn is_valid(value: &str) -> bool {
        Self::ALL.iter().any(|tag| tag.as_str() == value)
    }
}

impl fmt::Display for ComponentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct InvalidComponentTag(pub String);

impl FromStr for ComponentTag {
    type Err = InvalidComponentTag;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == value)
            .ok_or_else(|| InvalidComponentTag(value.to_string()))
    }
}

/// The wire envelope. `component` is kept as a raw string (not
/// `ComponentTag`) so an unrecognized value deserializes successfully and
/// the server can answer with a uniform `Response.error` instead of a 400.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub component: String,
    pub options: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub cancelled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn ok(result: serde_json::Value) -> Self {
        Self {
            result: Some(result),
            cancelled: false,
            error: None,
        }
    }

    pub fn cancelled() -> Self {
        Self {
            result: None,
            cancelled: true,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            result: None,
            cancelled: false,
            error: Some(message.into()),
        }
    }

    pub fn unknown_component(component: &str) -> Self {
        Self::error(format!("unknown component '{component}'"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmRequest {
    pub title: String,
    pub description: String,
    #[serde(default = "default_affirmative")]
    pub affirmative: String,
    #[serde(default = "default_negative")]
    pub negative: String,
    #[serde(default)]
    pub default: bool,
}

fn default_affirmative() -> String {
    "Yes".to_string()
}

fn default_negative() -> String {
    "No".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmResult {
    pub confirmed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputRequest {
    pub title: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub default: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputResult {
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChooseRequest {
    pub title: String,
    pub options: Vec<String>,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub no_limit: bool,
}

/// `selected` tolerates either a bare string or a single-element array on
/// the wire (used by `choose_single`); callers normalize via
/// [`ChooseResult::selected_values`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectedField {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChooseResult {
    pub selected: SelectedField,
}

impl ChooseResult {
    pub fn selected_values(&self) -> Vec<String> {
        match &self.selected {
            SelectedField::One(value) => vec![value.clone()],
            SelectedField::Many(values) => values.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterRequest {
    pub title: String,
    pub options: Vec<String>,
    #[serde(default)]
    pub placeholder: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterResult {
    pub selected: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRequest {
    pub title: String,
    #[serde(default)]
    pub directory: Option<String>,
    #[serde(default)]
    pub show_hidden: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResult {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteRequest {
    pub title: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub default: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteResult {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextareaRequest {
    pub title: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub default: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextareaResult {
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinRequest {
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinResult {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagerRequest {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagerResult {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRequest {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableResult {
    #[serde(default)]
    pub selected_row: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_valid_accepts_only_closed_set() {
        for tag in ComponentTag::ALL {
            assert!(ComponentTag::is_valid(tag.as_str()));
        }
        assert!(!ComponentTag::is_valid("dropdown"));
        assert!(!ComponentTag::is_valid("INPUT"));
    }

    #[test]
    fn choose_result_tolerates_string_or_array() {
        let one: ChooseResult = serde_json::from_str(r#"{"selected": "a"}"#).unwrap();
        assert_eq!(one.selected_values(), vec!["a".to_string()]);

        let many: ChooseResult = serde_json::from_str(r#"{"selected": ["a", "b"]}"#).unwrap();
        assert_eq!(many.selected_values(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn response_unknown_component_message() {
        let response = Response::unknown_component("dropdown");
        assert_eq!(response.error.as_deref(), Some("unknown component 'dropdown'"));
        assert!(!response.cancelled);
        assert!(response.result.is_none());
    }
}
