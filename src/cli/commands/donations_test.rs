use crate::cli::api_client::ApiClient;
use crate::cli::commands::donations::*;
use crate::cli::commands::test_server::spawn_test_server;
use crate::cli::error::CliError;
use crate::services::donations::DonationForm;

fn form(amount: &str) -> DonationForm {
    DonationForm {
        amount: amount.to_string(),
        donor_name: "Anil".to_string(),
        donor_email: "anil@example.com".to_string(),
        ..Default::default()
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_donate_and_list() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));

    let output = donate(&api_client, &form("2500")).await.unwrap();
    assert!(output.starts_with("✓ Received ₹2500"));
    assert!(output.contains("Thank you for your donation!"));

    let output = recent_donations(&api_client, None, "table").await.unwrap();
    assert!(output.contains("Anil"));
    assert!(output.contains("₹2500"));
    assert!(output.contains("Just now"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_donate_invalid_amount() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));

    let result = donate(&api_client, &form("abc")).await;
    match result {
        Err(CliError::ApiError { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Please enter a valid donation amount.");
        }
        other => panic!("Expected ApiError, got {:?}", other),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_recent_donations_empty() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));

    let output = recent_donations(&api_client, Some(3), "table").await.unwrap();
    assert_eq!(output, "No donations yet.");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_donation_stats() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));

    donate(&api_client, &form("50000")).await.unwrap();

    let output = donation_stats(&api_client, "table").await.unwrap();
    assert!(output.contains("₹50000 of ₹100000 (50%)"));

    let output = donation_stats(&api_client, "json").await.unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["impact"]["jobs_secured"], 5);
    assert_eq!(parsed["impact"]["events_organized"], 12);
    assert_eq!(parsed["monthly"]["total"], 50000);
}
