use crate::services::jobs::{apply_for_job, fetch_job_by_id, fetch_jobs, track_job_application};
use crate::store::{
    FallbackStore, JobFilter, JobType, MemoryStore, PageRequest, StoreError,
};

fn portal_store() -> FallbackStore<MemoryStore, MemoryStore> {
    FallbackStore::new(MemoryStore::new(), MemoryStore::with_fixtures(), true)
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_jobs_full_time_first_page() {
    let store = portal_store();
    let filter = JobFilter {
        job_type: Some(JobType::FullTime),
        ..Default::default()
    };
    let page = fetch_jobs(&store, &PageRequest::new(1, 3).unwrap(), &filter)
        .await
        .unwrap();

    // Empty primary with a filter stays empty.
    assert_eq!(page.total_items, 0);

    let offline = FallbackStore::new(MemoryStore::offline(), MemoryStore::with_fixtures(), true);
    let page = fetch_jobs(&offline, &PageRequest::new(1, 3).unwrap(), &filter)
        .await
        .unwrap();
    let ids: Vec<&str> = page.items.iter().map(|j| j.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "4", "3"]);
    assert_eq!(page.total_pages, 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_jobs_second_page_of_fixtures() {
    let offline = FallbackStore::new(MemoryStore::offline(), MemoryStore::with_fixtures(), true);
    let page = fetch_jobs(&offline, &PageRequest::new(2, 3).unwrap(), &JobFilter::default())
        .await
        .unwrap();
    let ids: Vec<&str> = page.items.iter().map(|j| j.id.as_str()).collect();
    assert_eq!(ids, vec!["3", "5"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_job_by_id() {
    let store = portal_store();
    let job = fetch_job_by_id(&store, "5").await.unwrap().unwrap();
    assert_eq!(job.title, "HR Coordinator");
    assert!(fetch_job_by_id(&store, "missing").await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_apply_for_job_returns_application_url() {
    let store = portal_store();
    let url = apply_for_job(&store, "2").await.unwrap();
    assert_eq!(url, "https://digitalmediasolutions.in/careers/content-writer");

    let err = apply_for_job(&store, "nope").await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_track_job_application() {
    let store = MemoryStore::with_fixtures();
    assert!(track_job_application(&store, "1", Some("user-1")).await);
    assert!(track_job_application(&store, "1", None).await);

    let applications = store.job_applications().await;
    assert_eq!(applications.len(), 2);
    assert_eq!(applications[0].user_id.as_deref(), Some("user-1"));

    store.set_offline(true);
    assert!(!track_job_application(&store, "1", None).await);
}
