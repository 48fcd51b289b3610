//! Tests for the in-memory store.

use chrono::{Duration, Utc};

use crate::store::{
    DonationRepository, HousingRepository, JobApplication, JobFilter, JobRepository, JobType,
    MatchPreference, MemoryStore, NewDonation, NewJob, NewStory, PageRequest, ProfileRepository,
    Store, StoreError, StoryRepository, TourRequest, TourStatus,
};

use super::fixture_profiles;

fn new_job(source_id: &str) -> NewJob {
    NewJob {
        title: "Data Entry Operator".to_string(),
        company: "Inclusive Works".to_string(),
        location: "Kochi, Kerala".to_string(),
        job_type: JobType::PartTime,
        salary: "₹15,000/month".to_string(),
        posted_date: Utc::now(),
        logo: String::new(),
        description: "Enter records".to_string(),
        requirements: vec![],
        benefits: vec![],
        accessibility: vec!["Remote work".to_string()],
        featured: false,
        application_url: "https://jobs.test/apply".to_string(),
        source_name: "Test Board".to_string(),
        source_id: source_id.to_string(),
    }
}

fn donation(amount: u64, days_ago: i64) -> NewDonation {
    NewDonation {
        amount,
        full_name: "Asha".to_string(),
        email: "asha@example.com".to_string(),
        anonymous: false,
        message: None,
        donation_date: Utc::now() - Duration::days(days_ago),
        is_monthly: false,
    }
}

#[tokio::test]
async fn test_fixtures_are_sorted_newest_first() {
    let store = MemoryStore::with_fixtures();
    let page = store
        .jobs()
        .list(&PageRequest::new(1, 10).unwrap(), &JobFilter::default())
        .await
        .unwrap();
    let ids: Vec<&str> = page.items.iter().map(|j| j.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "4", "2", "3", "5"]);
    assert_eq!(page.total_items, 5);
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn test_housing_is_sorted_by_rating() {
    let store = MemoryStore::with_fixtures();
    let page = store
        .housing()
        .list(&PageRequest::default(), &Default::default())
        .await
        .unwrap();
    let ids: Vec<&str> = page.items.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, vec!["3", "1", "2", "4"]);
}

#[tokio::test]
async fn test_get_missing_is_none() {
    let store = MemoryStore::with_fixtures();
    assert!(store.jobs().get("999").await.unwrap().is_none());
    assert!(store.housing().get("2").await.unwrap().is_some());
}

#[tokio::test]
async fn test_inserted_job_is_found_by_source() {
    let store = MemoryStore::new();
    let job = store.jobs().insert(&new_job("abc")).await.unwrap();

    let found = store
        .jobs()
        .find_by_source("Test Board", "abc")
        .await
        .unwrap();
    assert_eq!(found, Some(job.id.clone()));
    assert!(
        store
            .jobs()
            .find_by_source("Test Board", "other")
            .await
            .unwrap()
            .is_none()
    );
    assert_eq!(store.count("jobs").await.unwrap(), 1);
}

#[tokio::test]
async fn test_applications_and_tours_are_recorded() {
    let store = MemoryStore::with_fixtures();
    store
        .jobs()
        .record_application(&JobApplication {
            job_id: "1".to_string(),
            user_id: None,
            applied_at: Utc::now(),
        })
        .await
        .unwrap();
    let tour = store
        .housing()
        .schedule_tour(&TourRequest {
            senior_living_id: "2".to_string(),
            user_id: "u1".to_string(),
            tour_date: "2025-03-14".to_string(),
            tour_time: "10:30".to_string(),
            notes: String::new(),
        })
        .await
        .unwrap();

    assert_eq!(tour.status, TourStatus::Scheduled);
    assert_eq!(store.job_applications().await.len(), 1);
    assert_eq!(store.housing_tours().await.len(), 1);
}

#[tokio::test]
async fn test_upsert_replaces_and_drops_score() {
    let store = MemoryStore::with_fixtures();
    let mut profile = fixture_profiles(Utc::now()).remove(0);
    profile.name = "Raj S.".to_string();
    profile.compatibility_score = Some(80);

    let saved = store.profiles().upsert(&profile).await.unwrap();
    assert!(saved.compatibility_score.is_none());

    let page = store
        .profiles()
        .list(&PageRequest::default(), &MatchPreference::default())
        .await
        .unwrap();
    assert_eq!(page.total_items, 6);
    let stored = store.profiles().get(&profile.id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Raj S.");
}

#[tokio::test]
async fn test_donation_amounts_since() {
    let store = MemoryStore::new();
    let repo = store.donations();
    repo.insert(&donation(500, 0)).await.unwrap();
    repo.insert(&donation(1000, 40)).await.unwrap();

    let recent = repo.amounts_since(Utc::now() - Duration::days(7)).await.unwrap();
    assert_eq!(recent, vec![500]);
    let mut all = repo.all_amounts().await.unwrap();
    all.sort();
    assert_eq!(all, vec![500, 1000]);

    let latest = repo.recent(1).await.unwrap();
    assert_eq!(latest[0].amount, 500);
}

#[tokio::test]
async fn test_inserted_stories_stay_unpublished() {
    let store = MemoryStore::new();
    store
        .stories()
        .insert(&NewStory {
            name: "Kiran".to_string(),
            age: 41,
            image: String::new(),
            story: "Got a job".to_string(),
            program: "Jobs".to_string(),
            impact: String::new(),
            submission_date: None,
        })
        .await
        .unwrap();

    assert!(store.stories().published().await.unwrap().is_empty());
    assert_eq!(store.all_stories().await.len(), 1);
}

#[tokio::test]
async fn test_count_rejects_unknown_tables() {
    let store = MemoryStore::new();
    assert_eq!(store.count("events").await.unwrap(), 0);
    assert!(matches!(
        store.count("nope").await,
        Err(StoreError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_offline_store_fails_with_connection_error() {
    let store = MemoryStore::offline();
    let err = store
        .jobs()
        .list(&PageRequest::default(), &JobFilter::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Connection { .. }));
    assert!(store.ping().await.is_err());

    store.set_offline(false);
    assert!(store.ping().await.is_ok());
}
