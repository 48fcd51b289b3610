use crate::api::AppState;
use crate::auth::{AuthNotifier, MemoryAuth};
use crate::cli::api_client::ApiClient;
use crate::cli::commands::PageParams;
use crate::cli::commands::jobs::*;
use crate::cli::commands::test_server::{spawn_test_server, spawn_with};
use crate::cli::error::CliError;
use crate::store::{FallbackStore, MemoryStore};

#[tokio::test(flavor = "multi_thread")]
async fn test_list_jobs_json() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));

    let output = list_jobs(&api_client, &JobQuery::default(), PageParams::default(), "json")
        .await
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 5);
    assert_eq!(parsed[0]["title"], "Customer Support Executive");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_jobs_table() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));

    let page = PageParams {
        page: Some(1),
        page_size: Some(2),
    };
    let output = list_jobs(&api_client, &JobQuery::default(), page, "table")
        .await
        .unwrap();
    assert!(output.contains("Customer Support Executive"));
    assert!(output.contains("Software Developer"));
    assert!(!output.contains("HR Coordinator"));
    assert!(output.contains("Page 1 of 3 (5 jobs)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_jobs_no_results() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));

    let query = JobQuery {
        keyword: Some("astronaut"),
        ..Default::default()
    };
    let output = list_jobs(&api_client, &query, PageParams::default(), "table")
        .await
        .unwrap();
    assert_eq!(output, "No jobs found.");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_jobs_bad_type() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));

    let query = JobQuery {
        job_type: Some("Gig"),
        ..Default::default()
    };
    let result = list_jobs(&api_client, &query, PageParams::default(), "table").await;
    match result {
        Err(CliError::ApiError { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Unknown job type: Gig");
        }
        other => panic!("Expected ApiError, got {:?}", other),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_job_detail() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));

    let output = get_job(&api_client, "3", "table").await.unwrap();
    assert!(output.contains("Accounts Assistant"));
    assert!(output.contains("Apply at"));

    let result = get_job(&api_client, "404", "table").await;
    assert!(matches!(result, Err(CliError::ApiError { status: 404, .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_apply_for_job() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));

    let output = apply_for_job(&api_client, "4", Some("cli-user")).await.unwrap();
    assert_eq!(
        output,
        "✓ Application recorded. Apply at: https://infotechsolutions.in/careers/software-developer"
    );
}

#[tokio::test]
async fn test_connection_refused() {
    let api_client = ApiClient::new(Some("http://127.0.0.1:1".to_string()));
    let result = get_job(&api_client, "1", "json").await;
    assert!(matches!(result, Err(CliError::ConnectionFailed { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unreachable_store_without_fallback() {
    let store = FallbackStore::new(MemoryStore::offline(), MemoryStore::with_fixtures(), false);
    let state = AppState::new(store, MemoryAuth::new(), AuthNotifier::new(), false);
    let (url, _handle) = spawn_with(state).await;
    let api_client = ApiClient::new(Some(url));

    let result = list_jobs(&api_client, &JobQuery::default(), PageParams::default(), "table").await;
    assert!(matches!(result, Err(CliError::StoreUnavailable { .. })));
}
