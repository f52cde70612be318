//! The immutable field-name to rule mapping every validator reads from.

use std::collections::HashMap;

use serde::Serialize;

use super::definition::SchemaDefinition;
use super::rules::{FieldKind, RuleCategory, RuleSpec};
use crate::error::CoreError;

pub const DEFAULT_TYPE_MISMATCH_MESSAGE: &str = "Invalid value for this field";

/// Compiled rules for one form, in declaration order.
///
/// Built once (usually at startup) and shared read-only; nothing mutates a
/// registry after construction.
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    fields: Vec<RuleSpec>,
    index: HashMap<String, usize>,
    type_mismatch_message: String,
}

/// Client-facing description of one registered field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSummary {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<String>>,
}

impl RuleRegistry {
    /// Compile every field of `definition`, rejecting duplicate names.
    pub fn from_definition(definition: &SchemaDefinition) -> Result<Self, CoreError> {
        let mut fields = Vec::with_capacity(definition.fields.len());
        let mut index = HashMap::with_capacity(definition.fields.len());

        for field in &definition.fields {
            let spec = field.compile()?;
            if index.insert(spec.name.clone(), fields.len()).is_some() {
                return Err(CoreError::schema(&spec.name, "declared more than once"));
            }
            fields.push(spec);
        }

        Ok(Self {
            fields,
            index,
            type_mismatch_message: definition
                .type_mismatch_message
                .clone()
                .unwrap_or_else(|| DEFAULT_TYPE_MISMATCH_MESSAGE.to_string()),
        })
    }

    /// Parse a JSON [`SchemaDefinition`] and compile it.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let definition: SchemaDefinition = serde_json::from_str(json)?;
        Self::from_definition(&definition)
    }

    pub fn get(&self, field: &str) -> Option<&RuleSpec> {
        self.index.get(field).map(|&i| &self.fields[i])
    }

    pub fn contains(&self, field: &str) -> bool {
        self.index.contains_key(field)
    }

    /// Registered fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &RuleSpec> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn type_mismatch_message(&self) -> &str {
        &self.type_mismatch_message
    }

    pub fn describe(&self) -> Vec<FieldSummary> {
        self.fields
            .iter()
            .map(|spec| FieldSummary {
                name: spec.name.clone(),
                kind: spec.kind(),
                required: spec.is_required(),
                allowed: match &spec.category {
                    RuleCategory::Enum(rule) => Some(rule.allowed.clone()),
                    _ => None,
                },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::definition::FieldDefinition;

    fn sample() -> SchemaDefinition {
        SchemaDefinition::new()
            .field("title", FieldDefinition::text().required("Title is required"))
            .field(
                "level",
                FieldDefinition::enumeration(["beginner", "advanced"], "Pick a level"),
            )
            .field("seats", FieldDefinition::number().min(1.0, "At least one seat"))
    }

    #[test]
    fn preserves_declaration_order() {
        let registry = RuleRegistry::from_definition(&sample()).unwrap();
        let names: Vec<&str> = registry.fields().map(RuleSpec::name).collect();
        assert_eq!(names, ["title", "level", "seats"]);
        assert_eq!(registry.len(), 3);
        assert!(registry.contains("seats"));
        assert!(!registry.contains("Seats"));
    }

    #[test]
    fn rejects_duplicate_fields() {
        let definition = sample().field("title", FieldDefinition::text());
        let err = RuleRegistry::from_definition(&definition).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid schema for field 'title': declared more than once"
        );
    }

    #[test]
    fn uses_default_type_mismatch_message() {
        let registry = RuleRegistry::from_definition(&sample()).unwrap();
        assert_eq!(
            registry.type_mismatch_message(),
            DEFAULT_TYPE_MISMATCH_MESSAGE
        );

        let custom = sample().with_type_mismatch_message("Wrong kind of value");
        let registry = RuleRegistry::from_definition(&custom).unwrap();
        assert_eq!(registry.type_mismatch_message(), "Wrong kind of value");
    }

    #[test]
    fn loads_from_json() {
        let registry = RuleRegistry::from_json(
            r#"{
                "fields": [
                    {"name": "code", "required": true, "pattern": "[A-Z]{3}",
                     "messages": {"required": "Code is required", "pattern": "Three capitals"}},
                    {"name": "attachment", "maxSize": 1024, "messages": {"maxSize": "Too big"}}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(registry.get("code").unwrap().kind(), FieldKind::Text);
        assert!(registry.get("code").unwrap().is_required());
        assert_eq!(registry.get("attachment").unwrap().kind(), FieldKind::File);
    }

    #[test]
    fn malformed_json_is_an_invalid_definition() {
        let err = RuleRegistry::from_json("{\"fields\": 3}").unwrap_err();
        assert!(matches!(err, CoreError::InvalidDefinition(_)));
    }

    #[test]
    fn describe_lists_enum_members() {
        let registry = RuleRegistry::from_definition(&sample()).unwrap();
        let summary = registry.describe();
        assert_eq!(summary[0].kind, FieldKind::Text);
        assert!(summary[0].required);
        assert_eq!(
            summary[1].allowed.as_deref(),
            Some(&["beginner".to_string(), "advanced".to_string()][..])
        );
        assert_eq!(summary[2].allowed, None);
    }
}
