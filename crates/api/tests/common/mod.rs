#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use campusnet_api::config::ServerConfig;
use campusnet_api::router::build_app_router;
use campusnet_api::state::AppState;
use campusnet_core::school_registration;
use campusnet_core::validation::RuleRegistry;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        schema_path: None,
    }
}

/// Build the full application router against the built-in school
/// registration schema.
pub fn build_test_app() -> Router {
    let registry = school_registration::registry().expect("built-in schema compiles");
    build_test_app_with(registry)
}

/// Build the full application router against an arbitrary registry.
pub fn build_test_app_with(registry: RuleRegistry) -> Router {
    let config = test_config();
    let state = AppState {
        config: Arc::new(config.clone()),
        registry: Arc::new(registry),
    };
    build_app_router(state, &config).expect("test router builds")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
