//! Tests for the session notifier.

use super::notifier::{AuthEvent, AuthNotifier};
use super::session::{Session, User};

fn session(id: &str) -> Session {
    Session {
        access_token: format!("token-{}", id),
        refresh_token: None,
        expires_at: None,
        user: User {
            id: id.to_string(),
            email: format!("{}@example.com", id),
        },
    }
}

#[tokio::test]
async fn test_multiple_subscribers_receive_same_event() {
    let notifier = AuthNotifier::new();
    let mut sub1 = notifier.subscribe();
    let mut sub2 = notifier.subscribe();

    let event = AuthEvent::SignedIn {
        session: session("u1"),
    };
    notifier.notify(event.clone());

    assert_eq!(sub1.recv().await.unwrap(), event);
    assert_eq!(sub2.recv().await.unwrap(), event);
}

#[tokio::test]
async fn test_notify_with_no_subscribers_does_not_panic() {
    let notifier = AuthNotifier::new();
    notifier.notify(AuthEvent::SignedOut);
}

#[tokio::test]
async fn test_events_are_tagged_json() {
    let json = serde_json::to_value(AuthEvent::SignedOut).unwrap();
    assert_eq!(json, serde_json::json!({"type": "SignedOut"}));

    let json = serde_json::to_value(AuthEvent::SignedIn {
        session: session("u2"),
    })
    .unwrap();
    assert_eq!(json["type"], "SignedIn");
    assert_eq!(json["data"]["session"]["user"]["id"], "u2");
}

#[tokio::test]
async fn test_late_subscriber_does_not_receive_old_events() {
    let notifier = AuthNotifier::new();
    notifier.notify(AuthEvent::SignedOut);

    let mut sub = notifier.subscribe();
    let event = AuthEvent::SignedIn {
        session: session("u3"),
    };
    notifier.notify(event.clone());

    assert_eq!(sub.recv().await.unwrap(), event);
    assert!(sub.try_recv().is_err());
}
