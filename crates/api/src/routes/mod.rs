pub mod forms;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /forms/schema                 registered fields (GET)
/// /forms/initial-state          default form data (GET)
/// /forms/validate-field         check one scalar field (POST)
/// /forms/validate-file          check one file field (POST)
/// /forms/validate               check a whole form (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/forms", forms::router())
}
