use std::sync::Arc;

use campusnet_core::validation::RuleRegistry;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Compiled form rules, built once at startup and never mutated.
    pub registry: Arc<RuleRegistry>,
}
