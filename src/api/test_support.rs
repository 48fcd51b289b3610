//! Shared helpers for router tests.

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use crate::api::{AppState, routes};
use crate::auth::{AuthNotifier, MemoryAuth};
use crate::store::{FallbackStore, MemoryStore};

pub type TestStore = FallbackStore<MemoryStore, MemoryStore>;
pub type TestState = AppState<TestStore, MemoryAuth>;

/// Empty writable primary store backed by the fixture datasets.
pub fn test_state() -> TestState {
    let store = FallbackStore::new(MemoryStore::new(), MemoryStore::with_fixtures(), true);
    AppState::new(store, MemoryAuth::new(), AuthNotifier::new(), false)
}

/// Unreachable primary store, so every read is answered from fixtures.
pub fn offline_state() -> TestState {
    let store = FallbackStore::new(MemoryStore::offline(), MemoryStore::with_fixtures(), true);
    AppState::new(store, MemoryAuth::new(), AuthNotifier::new(), false)
}

/// Create a test app over [`test_state`]
pub fn test_app() -> Router {
    routes::create_router(test_state())
}

/// Helper to parse JSON response body
pub async fn json_body(response: Response<Body>) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, "POST", uri, body).await
}

pub async fn post_empty(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}
