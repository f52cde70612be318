//! Declarative schema definitions and their compilation into [`RuleSpec`]s.
//!
//! A definition is what a schema author writes, either as JSON or through the
//! builder methods on [`FieldDefinition`]. Compilation checks that every field
//! sits in exactly one constraint category and that every constraint has a
//! message, so the validators never have to deal with a half-specified rule.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::rules::{
    EnumRule, FieldKind, FileRule, Limit, NumberRule, PatternRule, RuleCategory, RuleSpec,
    TextRule,
};
use crate::error::CoreError;
use crate::types::FieldValue;

pub const REQUIRED: &str = "required";
pub const MIN_LENGTH: &str = "minLength";
pub const MAX_LENGTH: &str = "maxLength";
pub const PATTERN: &str = "pattern";
pub const ENUM: &str = "enum";
pub const MIN: &str = "min";
pub const MAX: &str = "max";
pub const MAX_SIZE: &str = "maxSize";
pub const ACCEPTED_TYPES: &str = "acceptedTypes";

const MESSAGE_KEYS: [&str; 9] = [
    REQUIRED,
    MIN_LENGTH,
    MAX_LENGTH,
    PATTERN,
    ENUM,
    MIN,
    MAX,
    MAX_SIZE,
    ACCEPTED_TYPES,
];

/// A complete form schema in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDefinition {
    /// Message for a value whose type does not fit its field's category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_mismatch_message: Option<String>,
    pub fields: Vec<NamedField>,
}

impl SchemaDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, definition: FieldDefinition) -> Self {
        self.fields.push(NamedField {
            name: name.into(),
            definition,
        });
        self
    }

    pub fn with_type_mismatch_message(mut self, message: impl Into<String>) -> Self {
        self.type_mismatch_message = Some(message.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedField {
    pub name: String,
    #[serde(flatten)]
    pub definition: FieldDefinition,
}

/// Constraints and messages for one field, as authored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Explicit category. Inferred from the constraints when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<FieldKind>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub messages: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<FieldValue>,
}

impl FieldDefinition {
    pub fn text() -> Self {
        Self::of_kind(FieldKind::Text)
    }

    pub fn number() -> Self {
        Self::of_kind(FieldKind::Number)
    }

    pub fn enumeration<I, S>(allowed: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut def = Self::of_kind(FieldKind::Enum);
        def.allowed = Some(allowed.into_iter().map(Into::into).collect());
        def.with_message(ENUM, message)
    }

    pub fn file() -> Self {
        Self::of_kind(FieldKind::File)
    }

    fn of_kind(kind: FieldKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    fn with_message(mut self, key: &str, message: impl Into<String>) -> Self {
        self.messages.insert(key.to_string(), message.into());
        self
    }

    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.required = true;
        self.with_message(REQUIRED, message)
    }

    pub fn min_length(mut self, chars: usize, message: impl Into<String>) -> Self {
        self.min_length = Some(chars);
        self.with_message(MIN_LENGTH, message)
    }

    pub fn max_length(mut self, chars: usize, message: impl Into<String>) -> Self {
        self.max_length = Some(chars);
        self.with_message(MAX_LENGTH, message)
    }

    pub fn pattern(mut self, pattern: impl Into<String>, message: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self.with_message(PATTERN, message)
    }

    pub fn min(mut self, value: f64, message: impl Into<String>) -> Self {
        self.min = Some(value);
        self.with_message(MIN, message)
    }

    pub fn max(mut self, value: f64, message: impl Into<String>) -> Self {
        self.max = Some(value);
        self.with_message(MAX, message)
    }

    pub fn max_size(mut self, bytes: u64, message: impl Into<String>) -> Self {
        self.max_size = Some(bytes);
        self.with_message(MAX_SIZE, message)
    }

    pub fn accepted_types<I, S>(mut self, types: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepted_types = Some(types.into_iter().map(Into::into).collect());
        self.with_message(ACCEPTED_TYPES, message)
    }

    pub fn default_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    fn declares_text(&self) -> bool {
        self.min_length.is_some() || self.max_length.is_some() || self.pattern.is_some()
    }

    fn declares_number(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    fn declares_file(&self) -> bool {
        self.max_size.is_some() || self.accepted_types.is_some()
    }

    /// The category implied by the declared constraints alone.
    fn inferred_kind(&self) -> Option<FieldKind> {
        if self.declares_file() {
            Some(FieldKind::File)
        } else if self.declares_number() {
            Some(FieldKind::Number)
        } else if self.allowed.is_some() {
            Some(FieldKind::Enum)
        } else if self.declares_text() {
            Some(FieldKind::Text)
        } else {
            None
        }
    }
}

impl NamedField {
    /// Check this definition and turn it into a [`RuleSpec`].
    pub fn compile(&self) -> Result<RuleSpec, CoreError> {
        let name = self.name.as_str();
        let def = &self.definition;

        if name.trim().is_empty() {
            return Err(CoreError::schema(name, "field name must not be empty"));
        }

        if let Some(key) = def
            .messages
            .keys()
            .find(|key| !MESSAGE_KEYS.contains(&key.as_str()))
        {
            return Err(CoreError::schema(name, format!("unknown message key '{key}'")));
        }

        let categories: Vec<&str> = [
            (def.declares_text() || def.allowed.is_some(), "text"),
            (def.declares_number(), "numeric"),
            (def.declares_file(), "file"),
        ]
        .into_iter()
        .filter_map(|(declared, label)| declared.then_some(label))
        .collect();
        if categories.len() > 1 {
            return Err(CoreError::schema(
                name,
                format!("mixes {} constraints", categories.join(" and ")),
            ));
        }

        let kind = match (def.kind, def.inferred_kind()) {
            (Some(explicit), Some(inferred)) if explicit != inferred => {
                return Err(CoreError::schema(
                    name,
                    format!(
                        "declared as {} but has {} constraints",
                        explicit.as_str(),
                        inferred.as_str()
                    ),
                ));
            }
            (Some(explicit), _) => explicit,
            (None, Some(inferred)) => inferred,
            (None, None) => FieldKind::Text,
        };

        let required = if def.required {
            if kind == FieldKind::File {
                return Err(CoreError::schema(name, "file fields cannot be required"));
            }
            Some(message_for(name, def, REQUIRED)?)
        } else {
            None
        };

        let category = match kind {
            FieldKind::Text => RuleCategory::Text(compile_text(name, def)?),
            FieldKind::Enum => RuleCategory::Enum(compile_enum(name, def)?),
            FieldKind::Number => RuleCategory::Number(compile_number(name, def)?),
            FieldKind::File => RuleCategory::File(compile_file(name, def)?),
        };

        let spec = RuleSpec {
            name: name.to_string(),
            required,
            category,
            default: def.default.clone(),
        };
        check_default(&spec)?;
        Ok(spec)
    }
}

fn message_for(name: &str, def: &FieldDefinition, key: &str) -> Result<String, CoreError> {
    def.messages
        .get(key)
        .cloned()
        .ok_or_else(|| CoreError::schema(name, format!("missing '{key}' message")))
}

fn limit<T>(
    name: &str,
    def: &FieldDefinition,
    value: Option<T>,
    key: &str,
) -> Result<Option<Limit<T>>, CoreError> {
    value
        .map(|value| message_for(name, def, key).map(|message| Limit { value, message }))
        .transpose()
}

fn compile_text(name: &str, def: &FieldDefinition) -> Result<TextRule, CoreError> {
    if let (Some(min), Some(max)) = (def.min_length, def.max_length) {
        if min > max {
            return Err(CoreError::schema(
                name,
                format!("minLength {min} exceeds maxLength {max}"),
            ));
        }
    }

    let pattern = match &def.pattern {
        Some(source) => {
            let regex = Regex::new(&format!("^(?:{source})$"))
                .map_err(|e| CoreError::schema(name, format!("invalid pattern: {e}")))?;
            Some(PatternRule {
                source: source.clone(),
                regex,
                message: message_for(name, def, PATTERN)?,
            })
        }
        None => None,
    };

    Ok(TextRule {
        min_length: limit(name, def, def.min_length, MIN_LENGTH)?,
        max_length: limit(name, def, def.max_length, MAX_LENGTH)?,
        pattern,
    })
}

fn compile_enum(name: &str, def: &FieldDefinition) -> Result<EnumRule, CoreError> {
    let allowed = match &def.allowed {
        Some(allowed) if !allowed.is_empty() => allowed.clone(),
        _ => return Err(CoreError::schema(name, "enum field declares no allowed values")),
    };
    Ok(EnumRule {
        text: compile_text(name, def)?,
        allowed,
        message: message_for(name, def, ENUM)?,
    })
}

fn compile_number(name: &str, def: &FieldDefinition) -> Result<NumberRule, CoreError> {
    for bound in [def.min, def.max].into_iter().flatten() {
        if !bound.is_finite() {
            return Err(CoreError::schema(name, "numeric bounds must be finite"));
        }
    }
    if let (Some(min), Some(max)) = (def.min, def.max) {
        if min > max {
            return Err(CoreError::schema(name, format!("min {min} exceeds max {max}")));
        }
    }
    Ok(NumberRule {
        min: limit(name, def, def.min, MIN)?,
        max: limit(name, def, def.max, MAX)?,
    })
}

fn compile_file(name: &str, def: &FieldDefinition) -> Result<FileRule, CoreError> {
    if def.accepted_types.as_ref().is_some_and(Vec::is_empty) {
        return Err(CoreError::schema(name, "acceptedTypes must not be empty"));
    }
    Ok(FileRule {
        max_size: limit(name, def, def.max_size, MAX_SIZE)?,
        accepted_types: limit(name, def, def.accepted_types.clone(), ACCEPTED_TYPES)?,
    })
}

/// A declared default must have the field's type and satisfy its enum set or
/// numeric bounds. Text defaults are not checked against length or pattern:
/// an empty default on a required field is expected to fail until edited.
fn check_default(spec: &RuleSpec) -> Result<(), CoreError> {
    let Some(value) = &spec.default else {
        return Ok(());
    };

    let consistent = match (&spec.category, value) {
        (RuleCategory::File(_), FieldValue::Null) => true,
        (RuleCategory::File(_), _) => false,
        (_, FieldValue::Null) => true,
        (RuleCategory::Text(_), FieldValue::Text(_)) => true,
        (RuleCategory::Enum(rule), FieldValue::Text(s)) => rule.allowed.contains(s),
        (RuleCategory::Number(rule), FieldValue::Number(n)) => {
            n.is_finite()
                && rule.min.as_ref().map_or(true, |min| *n >= min.value)
                && rule.max.as_ref().map_or(true, |max| *n <= max.value)
        }
        _ => false,
    };

    if consistent {
        Ok(())
    } else {
        Err(CoreError::schema(
            &spec.name,
            format!(
                "default {} value does not fit a {} field",
                value.type_name(),
                spec.kind().as_str()
            ),
        ))
    }
}
