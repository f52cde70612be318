//! Compiled rule and violation types.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::FieldValue;

/// A constraint value paired with the message shown when it is violated.
#[derive(Debug, Clone, PartialEq)]
pub struct Limit<T> {
    pub value: T,
    pub message: String,
}

/// A whole-value regular expression and its message.
#[derive(Debug, Clone)]
pub struct PatternRule {
    /// The pattern as written in the schema.
    pub source: String,
    /// `source` anchored to match the entire value.
    pub regex: Regex,
    pub message: String,
}

/// Length and pattern constraints for free-text fields.
#[derive(Debug, Clone, Default)]
pub struct TextRule {
    pub min_length: Option<Limit<usize>>,
    pub max_length: Option<Limit<usize>>,
    pub pattern: Option<PatternRule>,
}

/// Inclusive numeric bounds.
#[derive(Debug, Clone, Default)]
pub struct NumberRule {
    pub min: Option<Limit<f64>>,
    pub max: Option<Limit<f64>>,
}

/// A closed set of allowed strings. Any length/pattern constraints declared
/// alongside are checked before membership.
#[derive(Debug, Clone)]
pub struct EnumRule {
    pub text: TextRule,
    pub allowed: Vec<String>,
    pub message: String,
}

/// Size and media-type constraints for uploaded files.
#[derive(Debug, Clone, Default)]
pub struct FileRule {
    pub max_size: Option<Limit<u64>>,
    pub accepted_types: Option<Limit<Vec<String>>>,
}

/// The single constraint category a field belongs to.
#[derive(Debug, Clone)]
pub enum RuleCategory {
    Text(TextRule),
    Number(NumberRule),
    Enum(EnumRule),
    File(FileRule),
}

impl RuleCategory {
    pub fn kind(&self) -> FieldKind {
        match self {
            RuleCategory::Text(_) => FieldKind::Text,
            RuleCategory::Number(_) => FieldKind::Number,
            RuleCategory::Enum(_) => FieldKind::Enum,
            RuleCategory::File(_) => FieldKind::File,
        }
    }
}

/// Category tag used in schema definitions and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    Enum,
    File,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Enum => "enum",
            FieldKind::File => "file",
        }
    }
}

/// Everything the engine knows about one field.
#[derive(Debug, Clone)]
pub struct RuleSpec {
    pub(crate) name: String,
    pub(crate) required: Option<String>,
    pub(crate) category: RuleCategory,
    pub(crate) default: Option<FieldValue>,
}

impl RuleSpec {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_required(&self) -> bool {
        self.required.is_some()
    }

    /// Message for an empty value on a required field.
    pub fn required_message(&self) -> Option<&str> {
        self.required.as_deref()
    }

    pub fn category(&self) -> &RuleCategory {
        &self.category
    }

    pub fn kind(&self) -> FieldKind {
        self.category.kind()
    }

    /// Default declared in the schema, if any.
    pub fn declared_default(&self) -> Option<&FieldValue> {
        self.default.as_ref()
    }
}

/// Every way a value can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    MissingRequired,
    TooShort,
    TooLong,
    PatternMismatch,
    NotInEnum,
    BelowMinimum,
    AboveMaximum,
    FileTooLarge,
    UnsupportedFileType,
    TypeMismatch,
}

/// The first rule a value violated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub message: String,
}

impl Violation {
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
