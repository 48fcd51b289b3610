//! Tests for stories, tours and the admin overview.

use chrono::{Duration, Utc};

use crate::services::SubmissionError;
use crate::services::admin::table_statuses;
use crate::services::housing::{fetch_senior_living_by_id, fetch_senior_livings, schedule_tour};
use crate::services::stories::{get_success_stories, submit_success_story};
use crate::store::{
    FallbackStore, HousingFilter, KNOWN_TABLES, MemoryStore, NewStory, PageRequest,
    SuccessStory, TourRequest, TourStatus,
};

fn new_story(name: &str, story: &str) -> NewStory {
    NewStory {
        name: name.to_string(),
        age: 58,
        image: String::new(),
        story: story.to_string(),
        program: "Employment".to_string(),
        impact: "Financial independence".to_string(),
        submission_date: None,
    }
}

fn published(id: &str, days_ago: i64) -> SuccessStory {
    SuccessStory {
        id: id.to_string(),
        name: format!("Person {}", id),
        age: 60,
        image: String::new(),
        story: "A new beginning".to_string(),
        program: "Housing".to_string(),
        impact: String::new(),
        published: true,
        submission_date: Utc::now() - Duration::days(days_ago),
    }
}

fn tour(date: &str) -> TourRequest {
    TourRequest {
        senior_living_id: "1".to_string(),
        user_id: "user-1".to_string(),
        tour_date: date.to_string(),
        tour_time: "11:00".to_string(),
        notes: "Wheelchair user".to_string(),
    }
}

// =============================================================================
// Stories
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_submitted_story_is_hidden_until_published() {
    let store = MemoryStore::new();
    let stored = submit_success_story(&store, &new_story("Geeta", "I found work"))
        .await
        .unwrap();

    assert!(!stored.published);
    assert!(get_success_stories(&store).await.is_empty());
    assert_eq!(store.all_stories().await.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_story_requires_name_and_text() {
    let store = MemoryStore::new();
    let err = submit_success_story(&store, &new_story("", "text"))
        .await
        .unwrap_err();
    assert!(matches!(err, SubmissionError::MissingField { field: "name" }));

    let err = submit_success_story(&store, &new_story("Geeta", "   "))
        .await
        .unwrap_err();
    assert!(matches!(err, SubmissionError::MissingField { field: "story" }));
    assert!(store.all_stories().await.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_published_stories_newest_first() {
    let store = MemoryStore::new();
    store
        .seed_stories([published("a", 10), published("b", 1), published("c", 5)])
        .await;
    let ids: Vec<String> = get_success_stories(&store)
        .await
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec!["b", "c", "a"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stories_degrade_to_empty() {
    let store = MemoryStore::offline();
    assert!(get_success_stories(&store).await.is_empty());
    let err = submit_success_story(&store, &new_story("Geeta", "text"))
        .await
        .unwrap_err();
    assert!(!err.is_validation());
}

// =============================================================================
// Housing
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_housing_listing_from_fixtures() {
    let store = FallbackStore::new(MemoryStore::new(), MemoryStore::with_fixtures(), true);
    let page = fetch_senior_livings(&store, &PageRequest::new(1, 2).unwrap(), &HousingFilter::default())
        .await
        .unwrap();
    assert_eq!(page.total_items, 4);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.items[0].name, "Smriti Memory Care Home");

    let home = fetch_senior_living_by_id(&store, "4").await.unwrap().unwrap();
    assert_eq!(home.location, "Dehradun, Uttarakhand");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_schedule_tour() {
    let store = MemoryStore::with_fixtures();
    let booked = schedule_tour(&store, &tour("2025-06-01")).await.unwrap();
    assert_eq!(booked.status, TourStatus::Scheduled);
    assert_eq!(booked.notes, "Wheelchair user");
    assert_eq!(store.housing_tours().await.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_schedule_tour_requires_date() {
    let store = MemoryStore::with_fixtures();
    let err = schedule_tour(&store, &tour("")).await.unwrap_err();
    assert!(matches!(
        err,
        SubmissionError::MissingField { field: "tour_date" }
    ));
    assert!(store.housing_tours().await.is_empty());
}

// =============================================================================
// Admin
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_table_statuses_list_every_known_table() {
    let store = MemoryStore::with_fixtures();
    let statuses = table_statuses(&store).await;

    let names: Vec<&str> = statuses.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, KNOWN_TABLES.to_vec());
    assert!(statuses.iter().all(|s| s.exists));
    assert_eq!(statuses[0].record_count, Some(5));
    assert_eq!(statuses[1].record_count, Some(4));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unreachable_tables_are_missing() {
    let store = MemoryStore::offline();
    let statuses = table_statuses(&store).await;
    assert_eq!(statuses.len(), KNOWN_TABLES.len());
    assert!(statuses.iter().all(|s| !s.exists && s.record_count.is_none()));
}
