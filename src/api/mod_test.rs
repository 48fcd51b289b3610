use axum::http::StatusCode;

use super::test_support::{get, json_body, test_app};
use super::{AppState, Config, DEFAULT_PORT, routes};
use crate::auth::{AuthNotifier, MemoryAuth};
use crate::store::MemoryStore;

#[test]
fn test_config_default_port() {
    let config = Config::default();
    assert_eq!(config.port, DEFAULT_PORT);
    assert!(config.host.is_unspecified());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_health_reports_missing_credentials() {
    let app = test_app();
    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["credentials"], "missing");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_health_reports_configured_credentials() {
    let state = AppState::new(
        MemoryStore::new(),
        MemoryAuth::new(),
        AuthNotifier::new(),
        true,
    );
    let app = routes::create_router(state);
    let body = json_body(get(&app, "/health").await).await;
    assert_eq!(body["credentials"], "configured");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_docs_are_served() {
    let app = test_app();
    let response = get(&app, "/docs").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_route_is_404() {
    let app = test_app();
    let response = get(&app, "/api/v1/nothing-here").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
