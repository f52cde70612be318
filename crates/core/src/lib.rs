//! Core domain logic for campusnet forms. No I/O, no async.

pub mod error;
pub mod school_registration;
pub mod types;
pub mod validation;
