use serial_test::serial;

use crate::cli::api_client::*;

#[test]
#[serial]
fn test_new_with_explicit_url() {
    let client = ApiClient::new(Some("http://custom:8080".to_string()));
    assert_eq!(client.base_url(), "http://custom:8080");
}

#[test]
#[serial]
fn test_trailing_slash_is_trimmed() {
    let client = ApiClient::new(Some("http://custom:8080/".to_string()));
    assert_eq!(client.base_url(), "http://custom:8080");
}

#[test]
#[serial]
fn test_env_url_is_used_without_explicit() {
    unsafe { std::env::set_var(API_URL_ENV, "http://from-env:9000") };
    let client = ApiClient::new(None);
    unsafe { std::env::remove_var(API_URL_ENV) };
    assert_eq!(client.base_url(), "http://from-env:9000");
}

#[test]
#[serial]
fn test_default_url() {
    unsafe { std::env::remove_var(API_URL_ENV) };
    let client = ApiClient::new(None);
    assert_eq!(client.base_url(), DEFAULT_API_URL);
}

#[test]
#[serial]
fn test_explicit_url_beats_env() {
    unsafe { std::env::set_var(API_URL_ENV, "http://from-env:9000") };
    let client = ApiClient::new(Some("http://explicit:7777".to_string()));
    unsafe { std::env::remove_var(API_URL_ENV) };
    assert_eq!(client.base_url(), "http://explicit:7777");
}
