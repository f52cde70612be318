use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use campusnet_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `campusnet_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A request body that failed its own shape checks.
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] validator::ValidationErrors),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::UnknownField(field) => (
                    StatusCode::BAD_REQUEST,
                    "UNKNOWN_FIELD",
                    format!("Unknown field: {field}"),
                ),
                CoreError::NotAFileField(field) => (
                    StatusCode::BAD_REQUEST,
                    "NOT_A_FILE_FIELD",
                    format!("Field '{field}' does not accept files"),
                ),
                CoreError::Schema { .. } | CoreError::InvalidDefinition(_) => {
                    tracing::error!(error = %core, "Schema error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- HTTP-specific errors ---
            AppError::InvalidRequest(errors) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                errors.to_string(),
            ),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
