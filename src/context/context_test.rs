use std::sync::Arc;
use std::time::Duration;

use super::{
    ContextError, HOUSING_ERROR, JOBS_ERROR, MATCHES_ERROR, PortalContext, Tracked,
};
use crate::auth::{AuthEvent, AuthNotifier, Session, User};
use crate::store::{
    AgeRange, FallbackStore, Job, JobFilter, MatchPreference, MemoryStore, Page, PageRequest,
    ProfileUpdate,
};

fn session(user_id: &str) -> Session {
    Session {
        access_token: format!("token-{}", user_id),
        refresh_token: None,
        expires_at: None,
        user: User {
            id: user_id.to_string(),
            email: format!("{}@example.com", user_id),
        },
    }
}

fn signed_in(user_id: &str) -> AuthEvent {
    AuthEvent::SignedIn {
        session: session(user_id),
    }
}

async fn wait_for<F, Fut>(mut condition: F)
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..100 {
        if condition().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached");
}

// =============================================================================
// Lists
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_mount_loads_first_pages() {
    let context = PortalContext::new(Arc::new(MemoryStore::with_fixtures()));
    context.mount().await;

    let snapshot = context.snapshot().await;
    assert_eq!(snapshot.jobs.items.len(), 5);
    assert_eq!(snapshot.jobs.total_pages, 1);
    assert!(!snapshot.jobs.loading);
    assert_eq!(snapshot.housing.items.len(), 4);
    assert!(snapshot.housing.error.is_none());
    assert!(snapshot.matches.items.is_empty());
    assert!(snapshot.user.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failures_surface_retryable_messages() {
    let context = PortalContext::new(Arc::new(MemoryStore::offline()));
    context.mount().await;
    let matches = context
        .find_matches_with_preferences(&MatchPreference::default(), 1)
        .await;

    let snapshot = context.snapshot().await;
    assert_eq!(snapshot.jobs.error.as_deref(), Some(JOBS_ERROR));
    assert_eq!(snapshot.housing.error.as_deref(), Some(HOUSING_ERROR));
    assert_eq!(matches.error.as_deref(), Some(MATCHES_ERROR));
    assert!(!snapshot.jobs.loading);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_retry_clears_error() {
    let store = Arc::new(MemoryStore::offline());
    let context = PortalContext::new(Arc::clone(&store));
    let failed = context.fetch_jobs_with_filters(1, &JobFilter::default()).await;
    assert!(failed.error.is_some());

    store.set_offline(false);
    let retried = context.fetch_jobs_with_filters(1, &JobFilter::default()).await;
    assert!(retried.error.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_page_zero_is_rejected() {
    let context = PortalContext::new(Arc::new(MemoryStore::with_fixtures()));
    let state = context.fetch_jobs_with_filters(0, &JobFilter::default()).await;
    assert_eq!(
        state.error.as_deref(),
        Some("Validation error: page must be at least 1")
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_matches_use_fixture_fallback() {
    let store = FallbackStore::new(MemoryStore::offline(), MemoryStore::with_fixtures(), true);
    let context = PortalContext::new(Arc::new(store));
    let preference = MatchPreference {
        age_range: Some(AgeRange { min: 25, max: 35 }),
        gender: vec!["female".to_string()],
        looking_for: vec!["marriage".to_string()],
        interests: vec![],
    };
    let state = context.find_matches_with_preferences(&preference, 1).await;
    let ids: Vec<&str> = state.items.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["4", "2", "6"]);
}

#[test]
fn test_stale_response_never_overwrites_newer() {
    let mut list: Tracked<Job> = Tracked::default();
    let request = PageRequest::new(1, 5).unwrap();

    let older = list.begin();
    let newer = list.begin();

    assert!(list.finish(newer, Ok(Page::slice(vec![], &request))));
    assert!(!list.state.loading);

    // The older request resolves last and is dropped.
    assert!(!list.finish(older, Err("boom".to_string())));
    assert!(list.state.error.is_none());
}

#[test]
fn test_pending_newer_request_keeps_loading() {
    let mut list: Tracked<Job> = Tracked::default();
    let older = list.begin();
    let _newer = list.begin();
    assert!(!list.finish(older, Err("late".to_string())));
    assert!(list.state.loading);
}

// =============================================================================
// Session
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_save_profile_requires_sign_in() {
    let context = PortalContext::new(Arc::new(MemoryStore::new()));
    let err = context
        .save_profile(ProfileUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ContextError::SignInRequired));
    assert_eq!(err.to_string(), "Please sign in to save your profile");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sign_in_loads_profile_and_sign_out_clears() {
    let context = PortalContext::new(Arc::new(MemoryStore::with_fixtures()));

    assert!(context.apply(&signed_in("3")).await);
    assert_eq!(context.user().await.unwrap().id, "3");
    assert_eq!(context.profile().await.unwrap().id, "3");

    // Re-applying the same session is a no-op.
    assert!(!context.apply(&signed_in("3")).await);

    assert!(context.apply(&AuthEvent::SignedOut).await);
    assert!(context.user().await.is_none());
    assert!(context.profile().await.is_none());
    assert!(!context.apply(&AuthEvent::SignedOut).await);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_save_profile_for_signed_in_user() {
    let context = PortalContext::new(Arc::new(MemoryStore::new()));
    context.apply(&signed_in("user-7")).await;
    assert!(context.profile().await.is_none());

    let saved = context
        .save_profile(ProfileUpdate {
            name: Some("Kamala".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(saved.id, "user-7");
    assert_eq!(context.profile().await, Some(saved));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_listener_follows_notifier_until_stopped() {
    let context = Arc::new(PortalContext::new(Arc::new(MemoryStore::with_fixtures())));
    let notifier = AuthNotifier::new();
    let handle = context.listen(&notifier).await;
    assert!(handle.is_active());

    notifier.notify(signed_in("1"));
    wait_for(|| {
        let context = Arc::clone(&context);
        async move { context.profile().await.is_some() }
    })
    .await;

    handle.stop().await;
    notifier.notify(AuthEvent::SignedOut);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(context.user().await.unwrap().id, "1");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_only_one_subscription_at_a_time() {
    let context = Arc::new(PortalContext::new(Arc::new(MemoryStore::new())));
    let notifier = AuthNotifier::new();
    let first = context.listen(&notifier).await;
    let second = context.listen(&notifier).await;

    assert!(!first.is_active());
    assert!(second.is_active());

    notifier.notify(signed_in("u"));
    wait_for(|| {
        let context = Arc::clone(&context);
        async move { context.user().await.is_some() }
    })
    .await;
}
