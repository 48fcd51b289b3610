//! Tests for the fixture fallback decorator.

use chrono::Utc;

use crate::store::{
    AgeRange, FallbackStore, HousingRepository, JobFilter, JobRepository, JobType,
    MatchPreference, MemoryStore, PageRequest, ProfileRepository, Store, StoreError,
};
use crate::store::memory::fixture_jobs;

fn offline_with_fixtures() -> FallbackStore<MemoryStore, MemoryStore> {
    FallbackStore::new(MemoryStore::offline(), MemoryStore::with_fixtures(), true)
}

#[tokio::test]
async fn test_failing_primary_serves_filtered_fixture_page() {
    let store = offline_with_fixtures();
    let filter = JobFilter {
        job_type: Some(JobType::FullTime),
        ..Default::default()
    };

    let page = store
        .jobs()
        .list(&PageRequest::new(1, 3).unwrap(), &filter)
        .await
        .unwrap();

    let ids: Vec<&str> = page.items.iter().map(|j| j.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "4", "3"]);
    assert_eq!(page.total_items, 4);
    assert_eq!(page.total_pages, 2);
}

#[tokio::test]
async fn test_empty_primary_first_page_uses_fixtures() {
    let store = FallbackStore::new(MemoryStore::new(), MemoryStore::with_fixtures(), true);
    let page = store
        .housing()
        .list(&PageRequest::default(), &Default::default())
        .await
        .unwrap();
    assert_eq!(page.total_items, 4);
}

#[tokio::test]
async fn test_empty_primary_with_filter_stays_empty() {
    let store = FallbackStore::new(MemoryStore::new(), MemoryStore::with_fixtures(), true);
    let filter = JobFilter {
        location: Some("Pune".to_string()),
        ..Default::default()
    };
    let page = store
        .jobs()
        .list(&PageRequest::default(), &filter)
        .await
        .unwrap();
    assert!(page.is_empty());
    assert_eq!(page.total_items, 0);
}

#[tokio::test]
async fn test_populated_primary_is_authoritative() {
    let primary = MemoryStore::new();
    let mut job = fixture_jobs(Utc::now()).remove(1);
    job.id = "live-1".to_string();
    primary.seed_jobs([job]).await;

    let store = FallbackStore::new(primary, MemoryStore::with_fixtures(), true);
    let page = store
        .jobs()
        .list(&PageRequest::default(), &JobFilter::default())
        .await
        .unwrap();
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].id, "live-1");
}

#[tokio::test]
async fn test_disabled_fallback_surfaces_errors() {
    let store = FallbackStore::new(MemoryStore::offline(), MemoryStore::with_fixtures(), false);
    let err = store
        .jobs()
        .list(&PageRequest::default(), &JobFilter::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Connection { .. }));
    assert!(!store.is_enabled());
}

#[tokio::test]
async fn test_get_falls_back_for_fixture_ids() {
    let store = FallbackStore::new(MemoryStore::new(), MemoryStore::with_fixtures(), true);
    let job = store.jobs().get("2").await.unwrap().unwrap();
    assert_eq!(job.title, "Content Writer");
    assert!(store.housing().get("42").await.unwrap().is_none());
}

#[tokio::test]
async fn test_matches_from_fixtures_in_activity_order() {
    let store = offline_with_fixtures();
    let preference = MatchPreference {
        age_range: Some(AgeRange { min: 25, max: 35 }),
        gender: vec!["female".to_string()],
        looking_for: vec!["marriage".to_string()],
        interests: vec![],
    };
    let page = store
        .profiles()
        .list(&PageRequest::new(1, 5).unwrap(), &preference)
        .await
        .unwrap();
    let ids: Vec<&str> = page.items.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["4", "2", "6"]);
}

#[tokio::test]
async fn test_writes_never_reach_fixtures() {
    let store = offline_with_fixtures();
    let profile = store.fixtures().profiles().get("1").await.unwrap().unwrap();
    assert!(store.profiles().upsert(&profile).await.is_err());
}
