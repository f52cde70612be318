//! Default data for a fresh, unedited form.

use super::registry::RuleRegistry;
use super::rules::{RuleCategory, RuleSpec};
use crate::types::{FieldValue, FormData};

/// One entry per registered field, seeded from declared defaults.
///
/// Without a declared default: text fields start empty, numeric fields start
/// at their lower bound, enum fields at their first member, file fields null.
/// Only required text fields fail validation on the result.
pub fn initial_state(registry: &RuleRegistry) -> FormData {
    registry
        .fields()
        .map(|spec| (spec.name().to_string(), default_for(spec)))
        .collect()
}

fn default_for(spec: &RuleSpec) -> FieldValue {
    if let Some(value) = spec.declared_default() {
        return value.clone();
    }

    match spec.category() {
        RuleCategory::Text(_) => FieldValue::Text(String::new()),
        RuleCategory::Enum(rule) => rule
            .allowed
            .first()
            .cloned()
            .map_or(FieldValue::Null, FieldValue::Text),
        RuleCategory::Number(rule) => {
            let value = match (&rule.min, &rule.max) {
                (Some(min), _) => min.value,
                (None, Some(max)) if max.value < 0.0 => max.value,
                _ => 0.0,
            };
            FieldValue::Number(value)
        }
        RuleCategory::File(_) => FieldValue::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::definition::{FieldDefinition, SchemaDefinition};
    use crate::validation::form::validate_form;

    fn registry() -> RuleRegistry {
        let definition = SchemaDefinition::new()
            .field("title", FieldDefinition::text().required("Title is required"))
            .field("notes", FieldDefinition::text().max_length(50, "Too long"))
            .field(
                "term",
                FieldDefinition::enumeration(["fall", "spring"], "Pick a term")
                    .required("Term is required"),
            )
            .field(
                "credits",
                FieldDefinition::number()
                    .required("Credits are required")
                    .min(1.0, "At least one")
                    .max(6.0, "At most six"),
            )
            .field(
                "offset",
                FieldDefinition::number().max(-5.0, "Must be -5 or less"),
            )
            .field(
                "capacity",
                FieldDefinition::number()
                    .max(500.0, "Too many")
                    .default_value(30.0),
            )
            .field("syllabus", FieldDefinition::file().max_size(10, "Too big"));
        RuleRegistry::from_definition(&definition).unwrap()
    }

    #[test]
    fn seeds_every_registered_field() {
        let state = initial_state(&registry());
        assert_eq!(state.len(), 7);
        assert_eq!(state["title"], FieldValue::from(""));
        assert_eq!(state["notes"], FieldValue::from(""));
        assert_eq!(state["term"], FieldValue::from("fall"));
        assert_eq!(state["credits"], FieldValue::Number(1.0));
        assert_eq!(state["offset"], FieldValue::Number(-5.0));
        assert_eq!(state["capacity"], FieldValue::Number(30.0));
        assert_eq!(state["syllabus"], FieldValue::Null);
    }

    #[test]
    fn only_required_text_fields_fail_initially() {
        let r = registry();
        let errors = validate_form(&r, &initial_state(&r));
        assert_eq!(errors.keys().collect::<Vec<_>>(), ["title"]);
    }

    #[test]
    fn is_deterministic() {
        let r = registry();
        assert_eq!(initial_state(&r), initial_state(&r));
    }
}
