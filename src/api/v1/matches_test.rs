//! Integration tests for matchmaking and profile endpoints.

use axum::http::StatusCode;
use serde_json::json;

use crate::api::routes;
use crate::api::test_support::{get, json_body, offline_state, post_json, send_json, test_app};

#[tokio::test(flavor = "multi_thread")]
async fn test_search_scores_fixture_profiles() {
    let app = routes::create_router(offline_state());
    let response = post_json(
        &app,
        "/api/v1/matches/search",
        json!({
            "age_range": {"min": 25, "max": 35},
            "gender": ["female"],
            "looking_for": ["marriage"],
            "page_size": 5
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let items = body["items"].as_array().unwrap();
    let ids: Vec<&str> = items.iter().map(|p| p["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["4", "2", "6"]);
    for item in items {
        assert_eq!(item["compatibility_score"], 100);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_without_criteria_returns_everyone() {
    let app = test_app();
    let body = json_body(post_json(&app, "/api/v1/matches/search", json!({})).await).await;
    assert_eq!(body["total_items"], 6);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_rejects_page_zero() {
    let app = test_app();
    let response = post_json(&app, "/api/v1/matches/search", json!({"page": 0})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_profile_requires_sign_in() {
    let app = test_app();
    let response = get(&app, "/api/v1/profile").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send_json(&app, "PUT", "/api/v1/profile", json!({"name": "Asha"})).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Please sign in to save your profile");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_profile_save_and_load_after_sign_up() {
    let app = test_app();
    let response = post_json(
        &app,
        "/api/v1/auth/signup",
        json!({"email": "asha@example.com", "password": "Passw0rdOk"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let user_id = json_body(response).await["user"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = get(&app, "/api/v1/profile").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send_json(
        &app,
        "PUT",
        "/api/v1/profile",
        json!({"name": "Asha", "age": 29, "interests": ["music"]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let saved = json_body(response).await;
    assert_eq!(saved["id"], user_id);
    assert_eq!(saved["gender"], "other");
    assert_eq!(saved["looking_for"], json!(["marriage"]));

    let loaded = json_body(get(&app, "/api/v1/profile").await).await;
    assert_eq!(loaded["name"], "Asha");
    assert_eq!(loaded["age"], 29);
}
