//! Integration tests for senior living endpoints.

use axum::http::StatusCode;
use serde_json::json;

use crate::api::routes;
use crate::api::test_support::{get, json_body, post_json, test_app, test_state};
use crate::store::memory::fixture_housing;

fn names(body: &serde_json::Value) -> Vec<String> {
    body["items"]
        .as_array()
        .expect("Expected items array")
        .iter()
        .map(|h| h["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_housing_orders_by_rating() {
    let app = test_app();
    let response = get(&app, "/api/v1/housing").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(
        names(&body),
        vec![
            "Smriti Memory Care Home",
            "Ananda Vihar Retirement Village",
            "Sukoon Assisted Living",
            "Prakriti Independent Residences",
        ]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_housing_filters_seeded_primary() {
    let state = test_state();
    state.store().primary().seed_housing(fixture_housing()).await;
    let app = routes::create_router(state);

    let body = json_body(get(&app, "/api/v1/housing?price=30000-50000").await).await;
    assert_eq!(
        names(&body),
        vec![
            "Ananda Vihar Retirement Village",
            "Prakriti Independent Residences",
        ]
    );

    let body = json_body(get(&app, "/api/v1/housing?amenities=Garden,Library").await).await;
    assert_eq!(body["total_items"], 2);

    let body = json_body(get(&app, "/api/v1/housing?type=Memory%20Care").await).await;
    assert_eq!(names(&body), vec!["Smriti Memory Care Home"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_housing_rejects_bad_price() {
    let app = test_app();
    let response = get(&app, "/api/v1/housing?price=cheap").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Invalid price range: cheap");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_housing_by_id() {
    let app = test_app();
    let body = json_body(get(&app, "/api/v1/housing/2").await).await;
    assert_eq!(body["name"], "Sukoon Assisted Living");

    let response = get(&app, "/api/v1/housing/99").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Senior living '99' not found");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_schedule_tour_is_created() {
    let state = test_state();
    let app = routes::create_router(state.clone());

    let response = post_json(
        &app,
        "/api/v1/housing/1/tours",
        json!({
            "user_id": "user-1",
            "tour_date": "2025-06-01",
            "tour_time": "10:30",
            "notes": "Wheelchair user"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response).await;
    assert_eq!(body["senior_living_id"], "1");
    assert_eq!(body["status"], "scheduled");

    let tours = state.store().primary().housing_tours().await;
    assert_eq!(tours.len(), 1);
    assert_eq!(tours[0].notes, "Wheelchair user");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_schedule_tour_requires_date() {
    let app = test_app();
    let response = post_json(
        &app,
        "/api/v1/housing/1/tours",
        json!({"user_id": "user-1", "tour_date": " ", "tour_time": "10:30"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "tour_date is required");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_schedule_tour_requires_visitor() {
    // No user_id and nobody signed in
    let app = test_app();
    let response = post_json(
        &app,
        "/api/v1/housing/1/tours",
        json!({"tour_date": "2025-06-01", "tour_time": "10:30"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
