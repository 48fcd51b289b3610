//! Sign-in, sign-up and sign-out.
//!
//! Successful calls update the portal context and broadcast an
//! [`AuthEvent`] to WebSocket subscribers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::api::AppState;
use crate::api::error::{ApiFailure, ErrorResponse, auth_failure};
use crate::auth::{AuthError, AuthEvent, AuthProvider, Credentials, Session, SignUp, User};
use crate::store::Store;

/// Current session response DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub user: Option<User>,
}

async fn publish<S: Store, A: AuthProvider + 'static>(state: &AppState<S, A>, event: AuthEvent) {
    state.context().apply(&event).await;
    state.notifier().notify(event);
}

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/api/v1/auth/signin",
    tag = "auth",
    request_body = Credentials,
    responses(
        (status = 200, description = "Signed in", body = Session),
        (status = 400, description = "Malformed email", body = ErrorResponse),
        (status = 401, description = "Credentials rejected", body = ErrorResponse),
        (status = 502, description = "Provider unavailable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn sign_in<S: Store, A: AuthProvider + 'static>(
    State(state): State<AppState<S, A>>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<Session>, ApiFailure> {
    let credentials = Credentials::new(&credentials.email, &credentials.password);
    let session = state
        .auth()
        .sign_in(&credentials)
        .await
        .map_err(auth_failure)?;
    publish(
        &state,
        AuthEvent::SignedIn {
            session: session.clone(),
        },
    )
    .await;
    Ok(Json(session))
}

/// Register a new account
///
/// When the provider requires email confirmation no session is returned
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    tag = "auth",
    request_body = Credentials,
    responses(
        (status = 201, description = "Account created", body = SignUp),
        (status = 400, description = "Malformed email or weak password", body = ErrorResponse),
        (status = 401, description = "Registration rejected", body = ErrorResponse),
        (status = 502, description = "Provider unavailable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn sign_up<S: Store, A: AuthProvider + 'static>(
    State(state): State<AppState<S, A>>,
    Json(credentials): Json<Credentials>,
) -> Result<(StatusCode, Json<SignUp>), ApiFailure> {
    let credentials = Credentials::new(&credentials.email, &credentials.password);
    let signup = state
        .auth()
        .sign_up(&credentials)
        .await
        .map_err(auth_failure)?;
    info!(user_id = %signup.user.id, "Account created");
    if let Some(session) = &signup.session {
        publish(
            &state,
            AuthEvent::SignedIn {
                session: session.clone(),
            },
        )
        .await;
    }
    Ok((StatusCode::CREATED, Json(signup)))
}

/// Sign out the current session
#[utoipa::path(
    post,
    path = "/api/v1/auth/signout",
    tag = "auth",
    responses(
        (status = 204, description = "Signed out"),
        (status = 401, description = "Not signed in", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn sign_out<S: Store, A: AuthProvider + 'static>(
    State(state): State<AppState<S, A>>,
) -> Result<StatusCode, ApiFailure> {
    let session = state
        .context()
        .session()
        .await
        .ok_or_else(|| auth_failure(AuthError::NotSignedIn))?;
    state
        .auth()
        .sign_out(&session)
        .await
        .map_err(auth_failure)?;
    publish(&state, AuthEvent::SignedOut).await;
    Ok(StatusCode::NO_CONTENT)
}

/// The signed-in user, if any
#[utoipa::path(
    get,
    path = "/api/v1/auth/session",
    tag = "auth",
    responses((status = 200, description = "Current user", body = SessionResponse))
)]
#[instrument(skip(state))]
pub async fn current_session<S: Store, A: AuthProvider + 'static>(
    State(state): State<AppState<S, A>>,
) -> Json<SessionResponse> {
    Json(SessionResponse {
        user: state.context().user().await,
    })
}
