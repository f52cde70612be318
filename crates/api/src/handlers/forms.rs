//! Handlers for the `/forms` resource.
//!
//! Form UIs call the single-field endpoints on every edit to show or clear an
//! inline error, and `/validate` once before accepting a submission.

use axum::extract::State;
use axum::Json;
use campusnet_core::types::{FieldValue, FileMeta, FormData};
use campusnet_core::validation::{self, FieldSummary, FormReport, Violation};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Result of a single-field check.
#[derive(Debug, Serialize)]
pub struct FieldCheck {
    pub field: String,
    pub valid: bool,
    pub error: Option<String>,
}

impl FieldCheck {
    fn new(field: String, violation: Option<Violation>) -> Self {
        Self {
            field,
            valid: violation.is_none(),
            error: violation.map(|v| v.message),
        }
    }
}

/// GET /api/v1/forms/schema
///
/// List the registered fields with their category and required flag.
pub async fn get_schema(State(state): State<AppState>) -> Json<DataResponse<Vec<FieldSummary>>> {
    Json(DataResponse {
        data: state.registry.describe(),
    })
}

/// GET /api/v1/forms/initial-state
///
/// Default data for a fresh form.
pub async fn get_initial_state(State(state): State<AppState>) -> Json<DataResponse<FormData>> {
    Json(DataResponse {
        data: validation::initial_state(&state.registry),
    })
}

/// Request body for the single-field endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct ValidateFieldRequest {
    #[validate(length(min = 1, max = 128))]
    pub field: String,
    #[serde(default)]
    pub value: FieldValue,
}

/// POST /api/v1/forms/validate-field
///
/// Check one value. Unknown field names are rejected with 400.
pub async fn validate_field(
    State(state): State<AppState>,
    Json(body): Json<ValidateFieldRequest>,
) -> AppResult<Json<DataResponse<FieldCheck>>> {
    body.validate()?;

    let violation = validation::try_validate_field(&state.registry, &body.field, &body.value)?;
    tracing::debug!(
        field = %body.field,
        valid = violation.is_none(),
        "Field validated"
    );

    Ok(Json(DataResponse {
        data: FieldCheck::new(body.field, violation),
    }))
}

/// Request body for the file endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct ValidateFileRequest {
    #[validate(length(min = 1, max = 128))]
    pub field: String,
    #[serde(default)]
    pub file: Option<FileMeta>,
}

/// POST /api/v1/forms/validate-file
///
/// Check one file. A missing `file` always passes; a field that does not
/// take files is rejected with 400.
pub async fn validate_file(
    State(state): State<AppState>,
    Json(body): Json<ValidateFileRequest>,
) -> AppResult<Json<DataResponse<FieldCheck>>> {
    body.validate()?;

    let violation =
        validation::try_validate_file(&state.registry, &body.field, body.file.as_ref())?;
    tracing::debug!(
        field = %body.field,
        valid = violation.is_none(),
        "File validated"
    );

    Ok(Json(DataResponse {
        data: FieldCheck::new(body.field, violation),
    }))
}

/// Request body for the whole-form endpoint.
#[derive(Debug, Deserialize)]
pub struct ValidateFormRequest {
    #[serde(default)]
    pub data: FormData,
}

/// POST /api/v1/forms/validate
///
/// Validate every registered field. A submission is acceptable only when
/// `is_valid` is true.
pub async fn validate_form(
    State(state): State<AppState>,
    Json(body): Json<ValidateFormRequest>,
) -> Json<DataResponse<FormReport>> {
    let report = FormReport::from(validation::validate_form(&state.registry, &body.data));
    tracing::info!(
        is_valid = report.is_valid,
        errors = report.errors.len(),
        "Form submission validated"
    );
    Json(DataResponse { data: report })
}
