//! Declarative form validation engine.
//!
//! Rules are declared per field in a [`SchemaDefinition`], compiled once into
//! an immutable [`RuleRegistry`], and evaluated by pure functions that never
//! perform I/O or keep state between calls.

pub mod definition;
pub mod field;
pub mod file;
pub mod form;
pub mod initial_state;
pub mod registry;
pub mod rules;

pub use definition::{FieldDefinition, NamedField, SchemaDefinition};
pub use field::{try_validate_field, validate_field};
pub use file::{try_validate_file, validate_file};
pub use form::{validate_form, FormReport};
pub use initial_state::initial_state;
pub use registry::{FieldSummary, RuleRegistry};
pub use rules::{FieldKind, RuleCategory, RuleSpec, Violation, ViolationKind};
