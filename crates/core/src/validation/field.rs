//! Single-field validation for scalar values.
//!
//! Checks run in a fixed order and stop at the first failure: required,
//! then minimum and maximum length, then pattern, then enum membership, then
//! numeric bounds. A field therefore reports at most one message.

use super::file::check_file;
use super::registry::RuleRegistry;
use super::rules::{
    EnumRule, NumberRule, RuleCategory, RuleSpec, TextRule, Violation, ViolationKind,
};
use crate::error::CoreError;
use crate::types::FieldValue;

/// Validate one value against the rules registered for `field`.
///
/// Unregistered fields are treated as valid and logged; use
/// [`try_validate_field`] to reject them instead. Called on a file field, this
/// runs the file checks only.
pub fn validate_field(
    registry: &RuleRegistry,
    field: &str,
    value: &FieldValue,
) -> Option<Violation> {
    match registry.get(field) {
        Some(spec) => check_value(spec, value, registry.type_mismatch_message()),
        None => {
            tracing::warn!(field = %field, "Validation requested for unregistered field");
            None
        }
    }
}

/// Like [`validate_field`], but an unregistered field is an error.
pub fn try_validate_field(
    registry: &RuleRegistry,
    field: &str,
    value: &FieldValue,
) -> Result<Option<Violation>, CoreError> {
    let spec = registry
        .get(field)
        .ok_or_else(|| CoreError::UnknownField(field.to_string()))?;
    Ok(check_value(spec, value, registry.type_mismatch_message()))
}

/// Dispatch on the field's declared category.
pub(crate) fn check_value(
    spec: &RuleSpec,
    value: &FieldValue,
    type_mismatch_message: &str,
) -> Option<Violation> {
    if let RuleCategory::File(rule) = &spec.category {
        return match value {
            FieldValue::File(file) => check_file(rule, Some(file)),
            v if v.is_empty() => None,
            _ => Some(Violation::new(
                ViolationKind::TypeMismatch,
                type_mismatch_message,
            )),
        };
    }

    if value.is_empty() {
        return spec
            .required_message()
            .map(|message| Violation::new(ViolationKind::MissingRequired, message));
    }

    match (&spec.category, value) {
        (RuleCategory::Text(rule), FieldValue::Text(s)) => check_text(rule, s),
        (RuleCategory::Enum(rule), FieldValue::Text(s)) => check_enum(rule, s),
        (RuleCategory::Number(rule), FieldValue::Number(n)) => check_number(rule, *n),
        _ => Some(Violation::new(
            ViolationKind::TypeMismatch,
            type_mismatch_message,
        )),
    }
}

fn check_text(rule: &TextRule, value: &str) -> Option<Violation> {
    let length = value.chars().count();

    if let Some(min) = &rule.min_length {
        if length < min.value {
            return Some(Violation::new(ViolationKind::TooShort, &min.message));
        }
    }
    if let Some(max) = &rule.max_length {
        if length > max.value {
            return Some(Violation::new(ViolationKind::TooLong, &max.message));
        }
    }
    if let Some(pattern) = &rule.pattern {
        if !pattern.regex.is_match(value) {
            return Some(Violation::new(
                ViolationKind::PatternMismatch,
                &pattern.message,
            ));
        }
    }
    None
}

fn check_enum(rule: &EnumRule, value: &str) -> Option<Violation> {
    check_text(&rule.text, value).or_else(|| {
        (!rule.allowed.iter().any(|allowed| allowed == value))
            .then(|| Violation::new(ViolationKind::NotInEnum, &rule.message))
    })
}

fn check_number(rule: &NumberRule, value: f64) -> Option<Violation> {
    if let Some(min) = &rule.min {
        if value < min.value {
            return Some(Violation::new(ViolationKind::BelowMinimum, &min.message));
        }
    }
    if let Some(max) = &rule.max {
        if value > max.value {
            return Some(Violation::new(ViolationKind::AboveMaximum, &max.message));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileMeta;
    use crate::validation::definition::{FieldDefinition, SchemaDefinition};
    use assert_matches::assert_matches;

    fn registry() -> RuleRegistry {
        let definition = SchemaDefinition::new()
            .field(
                "code",
                FieldDefinition::text()
                    .required("Code is required")
                    .min_length(3, "Code is too short")
                    .max_length(6, "Code is too long")
                    .pattern("[A-Z]+", "Capitals only"),
            )
            .field(
                "nickname",
                FieldDefinition::text()
                    .min_length(4, "Nickname is too short")
                    .pattern("[a-z]+", "Lowercase only"),
            )
            .field(
                "size",
                FieldDefinition::enumeration(["S", "M", "L"], "Pick S, M or L")
                    .required("Size is required")
                    .max_length(1, "One letter"),
            )
            .field(
                "rooms",
                FieldDefinition::number()
                    .required("Rooms is required")
                    .min(1.0, "At least one room")
                    .max(50.0, "At most fifty rooms"),
            )
            .field(
                "floors",
                FieldDefinition::number().min(1.0, "At least one floor"),
            )
            .field(
                "brochure",
                FieldDefinition::file().max_size(100, "Brochure too large"),
            );
        RuleRegistry::from_definition(&definition).unwrap()
    }

    fn kind_of(field: &str, value: impl Into<FieldValue>) -> Option<ViolationKind> {
        validate_field(&registry(), field, &value.into()).map(|v| v.kind)
    }

    #[test]
    fn required_field_rejects_null_empty_and_whitespace() {
        let r = registry();
        for value in [FieldValue::Null, "".into(), "   ".into()] {
            let violation = validate_field(&r, "code", &value).unwrap();
            assert_eq!(violation.kind, ViolationKind::MissingRequired);
            assert_eq!(violation.message, "Code is required");
        }
        assert_eq!(
            validate_field(&r, "rooms", &FieldValue::Null).unwrap().message,
            "Rooms is required"
        );
    }

    #[test]
    fn optional_empty_value_skips_every_other_rule() {
        let r = registry();
        assert_eq!(validate_field(&r, "nickname", &"".into()), None);
        assert_eq!(validate_field(&r, "nickname", &"  ".into()), None);
        assert_eq!(validate_field(&r, "floors", &FieldValue::Null), None);
    }

    #[test]
    fn text_checks_run_in_order() {
        assert_eq!(kind_of("code", "AB"), Some(ViolationKind::TooShort));
        assert_eq!(kind_of("code", "ABCDEFG"), Some(ViolationKind::TooLong));
        assert_eq!(kind_of("code", "abcd"), Some(ViolationKind::PatternMismatch));
        assert_eq!(kind_of("code", "ABCD"), None);
    }

    #[test]
    fn reports_only_the_first_violation() {
        // "a1" is both too short and not lowercase-only.
        let violation = validate_field(&registry(), "nickname", &"a1".into()).unwrap();
        assert_eq!(violation.kind, ViolationKind::TooShort);
        assert_eq!(violation.message, "Nickname is too short");
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert_eq!(kind_of("nickname", "éééé"), Some(ViolationKind::PatternMismatch));
        assert_eq!(kind_of("code", "ÉÉ"), Some(ViolationKind::TooShort));
    }

    #[test]
    fn enum_checks_text_rules_before_membership() {
        assert_eq!(kind_of("size", "M"), None);
        assert_eq!(kind_of("size", "XL"), Some(ViolationKind::TooLong));
        assert_eq!(kind_of("size", "X"), Some(ViolationKind::NotInEnum));
        assert_eq!(kind_of("size", "m"), Some(ViolationKind::NotInEnum));
    }

    #[test]
    fn numeric_bounds_are_inclusive() {
        assert_eq!(kind_of("rooms", 0.0), Some(ViolationKind::BelowMinimum));
        assert_eq!(kind_of("rooms", 1.0), None);
        assert_eq!(kind_of("rooms", 50.0), None);
        assert_eq!(kind_of("rooms", 50.5), Some(ViolationKind::AboveMaximum));
        assert_eq!(kind_of("floors", 1_000_000.0), None);
    }

    #[test]
    fn value_type_must_match_declared_category() {
        let r = registry();
        assert_matches!(
            validate_field(&r, "rooms", &"12".into()),
            Some(Violation { kind: ViolationKind::TypeMismatch, .. })
        );
        assert_matches!(
            validate_field(&r, "code", &FieldValue::Number(12.0)),
            Some(Violation { kind: ViolationKind::TypeMismatch, .. })
        );
        assert_eq!(
            validate_field(&r, "code", &FileMeta::new(1, "text/plain").into())
                .unwrap()
                .message,
            r.type_mismatch_message()
        );
    }

    #[test]
    fn file_field_only_runs_file_checks() {
        let r = registry();
        assert_eq!(
            kind_of("brochure", FileMeta::new(101, "application/pdf")),
            Some(ViolationKind::FileTooLarge)
        );
        assert_eq!(validate_field(&r, "brochure", &FieldValue::Null), None);
        assert_eq!(
            kind_of("brochure", "brochure.pdf"),
            Some(ViolationKind::TypeMismatch)
        );
    }

    #[test]
    fn unregistered_field_is_valid() {
        assert_eq!(kind_of("unknown", "anything"), None);
        assert_eq!(kind_of("Code", ""), None);
    }

    #[test]
    fn strict_variant_rejects_unregistered_field() {
        let r = registry();
        assert_matches!(
            try_validate_field(&r, "unknown", &"x".into()),
            Err(CoreError::UnknownField(name)) if name == "unknown"
        );
        assert_matches!(
            try_validate_field(&r, "code", &"AB".into()),
            Ok(Some(Violation { kind: ViolationKind::TooShort, .. }))
        );
    }
}
