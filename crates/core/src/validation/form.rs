//! Whole-form validation.

use serde::Serialize;

use super::field::check_value;
use super::registry::RuleRegistry;
use crate::types::{ErrorMap, FieldValue, FormData};

/// Validate every registered field and collect one message per failing field.
///
/// Iterates the registry, not `data`: a registered field missing from `data`
/// is validated as `Null`, and keys the registry does not know are ignored.
pub fn validate_form(registry: &RuleRegistry, data: &FormData) -> ErrorMap {
    let mut errors = ErrorMap::new();

    for spec in registry.fields() {
        let value = data.get(spec.name()).unwrap_or(&FieldValue::Null);
        if let Some(violation) = check_value(spec, value, registry.type_mismatch_message()) {
            errors.insert(spec.name().to_string(), violation.message);
        }
    }

    for key in data.keys().filter(|key| !registry.contains(key)) {
        tracing::debug!(field = %key, "Ignoring unregistered form field");
    }

    tracing::debug!(
        fields = registry.len(),
        errors = errors.len(),
        "Form validated"
    );
    errors
}

/// Outcome of a form validation pass, ready to hand to a client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormReport {
    pub is_valid: bool,
    pub errors: ErrorMap,
}

impl From<ErrorMap> for FormReport {
    fn from(errors: ErrorMap) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}
