//! Session change notifications.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::session::Session;

/// Messages broadcast when the portal session changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "data")]
pub enum AuthEvent {
    SignedIn { session: Session },
    SignedOut,
}

/// Pub/sub notifier for session changes.
#[derive(Clone)]
pub struct AuthNotifier {
    tx: broadcast::Sender<AuthEvent>,
}

impl Default for AuthNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthNotifier {
    /// Create a new AuthNotifier with a buffer of 100 events.
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(100);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.tx.subscribe()
    }

    /// Broadcast an event to all current subscribers.
    pub fn notify(&self, event: AuthEvent) {
        let _ = self.tx.send(event);
    }
}
