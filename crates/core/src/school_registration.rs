//! Built-in schema for the school registration form.
//!
//! Used by the registration page to create school, college and university
//! profiles. Field names match the JSON keys the form submits.

use crate::error::CoreError;
use crate::validation::{FieldDefinition, RuleRegistry, SchemaDefinition};

pub const NAME: &str = "name";
pub const DESCRIPTION: &str = "description";
pub const LOCATION: &str = "location";
pub const CONTACT_EMAIL: &str = "contactEmail";
pub const CONTACT_PHONE: &str = "contactPhone";
pub const WEBSITE: &str = "website";
pub const INSTITUTION_TYPE: &str = "institutionType";
pub const ESTABLISHED_YEAR: &str = "establishedYear";
pub const STUDENT_COUNT: &str = "studentCount";
pub const LOGO: &str = "logo";

/// 5 MiB.
pub const MAX_LOGO_SIZE: u64 = 5 * 1024 * 1024;

pub const ACCEPTED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

pub const INSTITUTION_TYPES: [&str; 3] = ["School", "College", "University"];

pub fn definition() -> SchemaDefinition {
    SchemaDefinition::new()
        .with_type_mismatch_message("Please enter a valid value")
        .field(
            NAME,
            FieldDefinition::text()
                .required("School name is required")
                .min_length(3, "School name must be at least 3 characters")
                .max_length(100, "School name must be at most 100 characters")
                .pattern(
                    r"[A-Za-z0-9 &'\-]+",
                    "School name may only contain letters, numbers, spaces, &, ' and -",
                ),
        )
        .field(
            DESCRIPTION,
            FieldDefinition::text()
                .required("Description is required")
                .min_length(20, "Description must be at least 20 characters")
                .max_length(1000, "Description must be at most 1000 characters"),
        )
        .field(
            LOCATION,
            FieldDefinition::text()
                .required("Location is required")
                .min_length(2, "Location must be at least 2 characters")
                .max_length(200, "Location must be at most 200 characters"),
        )
        .field(
            CONTACT_EMAIL,
            FieldDefinition::text()
                .required("Contact email is required")
                .max_length(254, "Contact email is too long")
                .pattern(
                    r"[^\s@]+@[^\s@]+\.[^\s@]+",
                    "Please enter a valid email address",
                ),
        )
        .field(
            CONTACT_PHONE,
            FieldDefinition::text()
                .required("Contact phone is required")
                .pattern(
                    r"\+?[0-9][0-9 ()\-]{6,19}",
                    "Please enter a valid phone number",
                ),
        )
        .field(
            WEBSITE,
            FieldDefinition::text()
                .max_length(200, "Website address must be at most 200 characters")
                .pattern(
                    r"https?://[^\s/$.?#][^\s]*",
                    "Website must start with http:// or https://",
                ),
        )
        .field(
            INSTITUTION_TYPE,
            FieldDefinition::enumeration(
                INSTITUTION_TYPES,
                "Institution type must be School, College or University",
            )
            .required("Institution type is required")
            .default_value("School"),
        )
        .field(
            ESTABLISHED_YEAR,
            FieldDefinition::number()
                .required("Established year is required")
                .min(1800.0, "Established year must be 1800 or later")
                .max(2100.0, "Established year must be 2100 or earlier")
                .default_value(2000.0),
        )
        .field(
            STUDENT_COUNT,
            FieldDefinition::number()
                .required("Student count is required")
                .min(1.0, "Student count must be at least 1")
                .max(10000.0, "Student count cannot exceed 10,000")
                .default_value(100.0),
        )
        .field(
            LOGO,
            FieldDefinition::file()
                .max_size(MAX_LOGO_SIZE, "Logo must be 5MB or smaller")
                .accepted_types(
                    ACCEPTED_IMAGE_TYPES,
                    "Logo must be a JPEG, PNG, GIF or WebP image",
                ),
        )
}

/// Compile the school registration schema.
pub fn registry() -> Result<RuleRegistry, CoreError> {
    RuleRegistry::from_definition(&definition())
}
