use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Form data keyed by field name. Field names are case-sensitive.
pub type FormData = BTreeMap<String, FieldValue>;

/// Field name to the single message describing its current violation.
pub type ErrorMap = BTreeMap<String, String>;

/// A single value held by a form field.
///
/// Serialized untagged so that form payloads look like plain JSON:
/// `null`, a number, a string, or `{"size": 1024, "type": "image/png"}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Number(f64),
    Text(String),
    File(FileMeta),
}

impl FieldValue {
    /// `Null` and whitespace-only strings count as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Number(_) | FieldValue::File(_) => false,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Number(_) => "number",
            FieldValue::Text(_) => "text",
            FieldValue::File(_) => "file",
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<FileMeta> for FieldValue {
    fn from(file: FileMeta) -> Self {
        FieldValue::File(file)
    }
}

/// The parts of an uploaded file that validation looks at.
///
/// Any other keys a client sends along (file name, last-modified, ...) are
/// ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    /// Size in bytes.
    pub size: u64,
    /// Media type as reported by the client, e.g. `image/png`.
    #[serde(rename = "type")]
    pub media_type: String,
}

impl FileMeta {
    pub fn new(size: u64, media_type: impl Into<String>) -> Self {
        Self {
            size,
            media_type: media_type.into(),
        }
    }
}
