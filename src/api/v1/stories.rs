//! Success story handlers.

use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use crate::api::AppState;
use crate::api::error::{ApiFailure, ErrorResponse, submission_failure};
use crate::auth::AuthProvider;
use crate::services::stories;
use crate::store::{NewStory, Store, SuccessStory};

/// Published stories, newest first
#[utoipa::path(
    get,
    path = "/api/v1/stories",
    tag = "stories",
    responses((status = 200, description = "Published stories", body = Vec<SuccessStory>))
)]
#[instrument(skip(state))]
pub async fn list_stories<S: Store, A: AuthProvider + 'static>(
    State(state): State<AppState<S, A>>,
) -> Json<Vec<SuccessStory>> {
    Json(stories::get_success_stories(state.store()).await)
}

/// Submit a story for moderation
///
/// The story is stored unpublished and appears once approved
#[utoipa::path(
    post,
    path = "/api/v1/stories",
    tag = "stories",
    request_body = NewStory,
    responses(
        (status = 201, description = "Story submitted", body = SuccessStory),
        (status = 400, description = "Missing field", body = ErrorResponse),
        (status = 502, description = "Store unavailable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn submit_story<S: Store, A: AuthProvider + 'static>(
    State(state): State<AppState<S, A>>,
    Json(story): Json<NewStory>,
) -> Result<(StatusCode, Json<SuccessStory>), ApiFailure> {
    let stored = stories::submit_success_story(state.store(), &story)
        .await
        .map_err(submission_failure)?;
    Ok((StatusCode::CREATED, Json(stored)))
}
