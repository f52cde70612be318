//! Route definitions for the `/forms` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::forms;
use crate::state::AppState;

/// Routes mounted at `/forms`.
///
/// ```text
/// GET    /schema           -> get_schema
/// GET    /initial-state    -> get_initial_state
/// POST   /validate-field   -> validate_field
/// POST   /validate-file    -> validate_file
/// POST   /validate         -> validate_form
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/schema", get(forms::get_schema))
        .route("/initial-state", get(forms::get_initial_state))
        .route("/validate-field", post(forms::validate_field))
        .route("/validate-file", post(forms::validate_file))
        .route("/validate", post(forms::validate_form))
}
