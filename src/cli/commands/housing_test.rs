use crate::cli::api_client::ApiClient;
use crate::cli::commands::PageParams;
use crate::cli::commands::housing::*;
use crate::cli::commands::test_server::spawn_test_server;
use crate::cli::error::CliError;

#[tokio::test(flavor = "multi_thread")]
async fn test_list_housing_table() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));

    let output = list_housing(
        &api_client,
        &HousingQuery::default(),
        PageParams::default(),
        "table",
    )
    .await
    .unwrap();
    assert!(output.contains("Smriti Memory Care Home"));
    assert!(output.contains("4.8 (54)"));
    assert!(output.contains("Page 1 of 1 (4 facilities)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_housing_bad_price() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));

    let query = HousingQuery {
        price: Some("a-b"),
        ..Default::default()
    };
    let result = list_housing(&api_client, &query, PageParams::default(), "json").await;
    assert!(matches!(result, Err(CliError::ApiError { status: 400, .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_housing_json() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));

    let output = get_housing(&api_client, "4", "json").await.unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["name"], "Prakriti Independent Residences");
    assert_eq!(parsed["type"], "Independent Living");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_schedule_tour() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));

    let request = TourRequest {
        user_id: Some("visitor-1".to_string()),
        tour_date: "2025-07-14".to_string(),
        tour_time: "15:00".to_string(),
        notes: String::new(),
    };
    let output = schedule_tour(&api_client, "2", request).await.unwrap();
    assert!(output.starts_with("✓ Tour scheduled for 2025-07-14 at 15:00"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_schedule_tour_requires_time() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));

    let request = TourRequest {
        user_id: Some("visitor-1".to_string()),
        tour_date: "2025-07-14".to_string(),
        tour_time: "".to_string(),
        notes: String::new(),
    };
    let result = schedule_tour(&api_client, "2", request).await;
    match result {
        Err(CliError::ApiError { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "tour_time is required");
        }
        other => panic!("Expected ApiError, got {:?}", other),
    }
}
