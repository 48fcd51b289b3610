//! Integration tests for job endpoints.

use axum::http::StatusCode;
use serde_json::json;

use crate::api::routes;
use crate::api::test_support::{get, json_body, post_empty, post_json, test_app, test_state};
use crate::auth::AuthEvent;

fn ids(body: &serde_json::Value) -> Vec<String> {
    body["items"]
        .as_array()
        .expect("Expected items array")
        .iter()
        .map(|j| j["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_jobs_defaults_to_fixture_page() {
    let app = test_app();
    let response = get(&app, "/api/v1/jobs").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(ids(&body), vec!["1", "4", "2", "3", "5"]);
    assert_eq!(body["total_items"], 5);
    assert_eq!(body["total_pages"], 1);
    assert_eq!(body["page_size"], 10);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_jobs_with_filter_and_page_size() {
    // A filtered first page does not fall back when the primary is empty.
    let app = test_app();
    let body = json_body(get(&app, "/api/v1/jobs?type=Full-time&page_size=3").await).await;
    assert_eq!(body["total_items"], 0);
    assert!(ids(&body).is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_jobs_rejects_bad_input() {
    let app = test_app();
    let response = get(&app, "/api/v1/jobs?type=Volunteer").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Unknown job type: Volunteer");

    let response = get(&app, "/api/v1/jobs?page=0").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_jobs_rejects_page_past_addressable_range() {
    let app = test_app();
    let response = get(&app, "/api/v1/jobs?page=9223372036854775809&page_size=2").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(
        body["error"],
        "Validation error: page 9223372036854775809 is out of range for page_size 2"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_job_by_id() {
    let app = test_app();
    let response = get(&app, "/api/v1/jobs/5").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["title"], "HR Coordinator");
    assert_eq!(body["type"], "Full-time");

    let response = get(&app, "/api/v1/jobs/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Job 'nope' not found");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_apply_records_application() {
    let app = test_app();
    let response = post_json(&app, "/api/v1/jobs/2/apply", json!({"user_id": "user-9"})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(
        body["application_url"],
        "https://digitalmediasolutions.in/careers/content-writer"
    );
    assert_eq!(body["tracked"], true);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_apply_without_body_uses_signed_in_user() {
    let state = test_state();
    let session = crate::auth::Session {
        access_token: "t".to_string(),
        refresh_token: None,
        expires_at: None,
        user: crate::auth::User {
            id: "user-3".to_string(),
            email: "user-3@example.com".to_string(),
        },
    };
    state
        .context()
        .apply(&AuthEvent::SignedIn { session })
        .await;
    let app = routes::create_router(state.clone());

    let response = post_empty(&app, "/api/v1/jobs/1/apply").await;
    assert_eq!(response.status(), StatusCode::OK);

    let recorded = state.store().primary().job_applications().await;
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].user_id.as_deref(), Some("user-3"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_apply_for_missing_job_is_404() {
    let app = test_app();
    let response = post_empty(&app, "/api/v1/jobs/missing/apply").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
