//! Portal context handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::api::AppState;
use crate::auth::AuthProvider;
use crate::context::ContextSnapshot;
use crate::store::Store;

/// Current context: user, profile and cached first pages
#[utoipa::path(
    get,
    path = "/api/v1/context",
    tag = "context",
    responses((status = 200, description = "Context snapshot", body = ContextSnapshot))
)]
#[instrument(skip(state))]
pub async fn get_context<S: Store, A: AuthProvider + 'static>(
    State(state): State<AppState<S, A>>,
) -> Json<ContextSnapshot> {
    Json(state.context().snapshot().await)
}

/// Reload the cached first pages of jobs and housing
#[utoipa::path(
    post,
    path = "/api/v1/context/refresh",
    tag = "context",
    responses((status = 200, description = "Refreshed snapshot", body = ContextSnapshot))
)]
#[instrument(skip(state))]
pub async fn refresh_context<S: Store, A: AuthProvider + 'static>(
    State(state): State<AppState<S, A>>,
) -> Json<ContextSnapshot> {
    let context = state.context();
    context.mount().await;
    Json(context.snapshot().await)
}
