//! WebSocket handler for session change events.

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use serde::Serialize;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};

use super::state::AppState;
use crate::auth::{AuthEvent, AuthProvider, User};
use crate::store::Store;

/// Frame sent to clients. Tokens stay on the server.
#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum SessionUpdate<'a> {
    SignedIn { user: &'a User },
    SignedOut,
}

impl<'a> From<&'a AuthEvent> for SessionUpdate<'a> {
    fn from(event: &'a AuthEvent) -> Self {
        match event {
            AuthEvent::SignedIn { session } => SessionUpdate::SignedIn {
                user: &session.user,
            },
            AuthEvent::SignedOut => SessionUpdate::SignedOut,
        }
    }
}

/// WebSocket upgrade handler.
///
/// Once upgraded, streams every session change as a JSON text frame.
pub async fn ws_handler<S: Store, A: AuthProvider + 'static>(
    ws: WebSocketUpgrade,
    State(state): State<AppState<S, A>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket<S: Store, A: AuthProvider>(mut socket: WebSocket, state: AppState<S, A>) {
    info!("WebSocket client connected");

    let mut rx = state.notifier().subscribe();

    loop {
        tokio::select! {
            Some(msg) = socket.recv() => {
                match msg {
                    Ok(Message::Text(text)) => {
                        debug!("Received from client: {}", text);
                    }
                    Ok(Message::Close(_)) => {
                        info!("Client closed connection");
                        break;
                    }
                    Err(e) => {
                        error!("WebSocket error: {}", e);
                        break;
                    }
                    _ => {}
                }
            }

            received = rx.recv() => {
                let event = match received {
                    Ok(event) => event,
                    Err(RecvError::Lagged(missed)) => {
                        warn!(missed, "WebSocket client lagging behind");
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };
                let json = match serde_json::to_string(&SessionUpdate::from(&event)) {
                    Ok(j) => j,
                    Err(e) => {
                        error!("Failed to serialize event: {}", e);
                        continue;
                    }
                };

                if let Err(e) = socket.send(Message::Text(json.into())).await {
                    error!("Failed to send event: {}", e);
                    break;
                }
            }
        }
    }

    info!("WebSocket client disconnected");
}
