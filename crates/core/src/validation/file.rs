//! File validation: size first, then media type.

use super::registry::RuleRegistry;
use super::rules::{FileRule, RuleCategory, Violation, ViolationKind};
use crate::error::CoreError;
use crate::types::FileMeta;

/// Validate an uploaded file against the rules registered for `field`.
///
/// An absent file always passes. Unregistered fields and fields that do not
/// take files pass as well, with a warning; [`try_validate_file`] rejects them.
pub fn validate_file(
    registry: &RuleRegistry,
    field: &str,
    file: Option<&FileMeta>,
) -> Option<Violation> {
    match registry.get(field).map(|spec| &spec.category) {
        Some(RuleCategory::File(rule)) => check_file(rule, file),
        Some(_) => {
            tracing::warn!(field = %field, "File validation requested for a non-file field");
            None
        }
        None => {
            tracing::warn!(field = %field, "Validation requested for unregistered field");
            None
        }
    }
}

/// Like [`validate_file`], but unknown and non-file fields are errors.
pub fn try_validate_file(
    registry: &RuleRegistry,
    field: &str,
    file: Option<&FileMeta>,
) -> Result<Option<Violation>, CoreError> {
    match registry.get(field).map(|spec| &spec.category) {
        Some(RuleCategory::File(rule)) => Ok(check_file(rule, file)),
        Some(_) => Err(CoreError::NotAFileField(field.to_string())),
        None => Err(CoreError::UnknownField(field.to_string())),
    }
}

pub(crate) fn check_file(rule: &FileRule, file: Option<&FileMeta>) -> Option<Violation> {
    let file = file?;

    if let Some(max) = &rule.max_size {
        if file.size > max.value {
            return Some(Violation::new(ViolationKind::FileTooLarge, &max.message));
        }
    }
    if let Some(accepted) = &rule.accepted_types {
        // Media types are case-insensitive.
        let known = accepted
            .value
            .iter()
            .any(|t| t.eq_ignore_ascii_case(&file.media_type));
        if !known {
            return Some(Violation::new(
                ViolationKind::UnsupportedFileType,
                &accepted.message,
            ));
        }
    }
    None
}
