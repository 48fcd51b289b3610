use tokio::net::TcpListener;

use crate::api::routes;
use crate::api::test_support::{TestState, test_state};

/// Spawn a test HTTP server over the given state
pub async fn spawn_with(state: TestState) -> (String, tokio::task::JoinHandle<()>) {
    let app = routes::create_router(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let url = format!("http://{}", addr);

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give server time to start
    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

    (url, handle)
}

/// Spawn a test HTTP server with an empty store backed by fixtures
pub async fn spawn_test_server() -> (String, tokio::task::JoinHandle<()>) {
    spawn_with(test_state()).await
}
