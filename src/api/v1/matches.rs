//! Matchmaking handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;
use utoipa::ToSchema;

use super::DEFAULT_PAGE_SIZE;
use crate::api::AppState;
use crate::api::error::{
    ApiFailure, ErrorResponse, context_failure, failure, store_failure,
};
use crate::auth::AuthProvider;
use crate::services::matchmaking;
use crate::store::{MatchPreference, MatchProfile, Page, PageRequest, ProfileUpdate, Store};

/// Match search request DTO
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct MatchSearchRequest {
    #[serde(flatten)]
    pub preference: MatchPreference,
    #[schema(example = 1)]
    pub page: Option<usize>,
    #[schema(example = 5)]
    pub page_size: Option<usize>,
}

/// Search match profiles
///
/// Returns profiles matching the preferences, most recently active first,
/// each annotated with a 0-100 compatibility score
#[utoipa::path(
    post,
    path = "/api/v1/matches/search",
    tag = "matches",
    request_body = MatchSearchRequest,
    responses(
        (status = 200, description = "Page of scored profiles", body = Page<MatchProfile>),
        (status = 400, description = "Invalid page", body = ErrorResponse),
        (status = 502, description = "Store unavailable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn search_matches<S: Store, A: AuthProvider + 'static>(
    State(state): State<AppState<S, A>>,
    Json(body): Json<MatchSearchRequest>,
) -> Result<Json<Page<MatchProfile>>, ApiFailure> {
    let page = PageRequest::from_parts(body.page, body.page_size, DEFAULT_PAGE_SIZE)
        .map_err(store_failure)?;
    matchmaking::find_matches(state.store(), &body.preference, &page)
        .await
        .map(Json)
        .map_err(store_failure)
}

/// Get the signed-in user's profile
#[utoipa::path(
    get,
    path = "/api/v1/profile",
    tag = "matches",
    responses(
        (status = 200, description = "Profile", body = MatchProfile),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 404, description = "No profile saved yet", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_profile<S: Store, A: AuthProvider + 'static>(
    State(state): State<AppState<S, A>>,
) -> Result<Json<MatchProfile>, ApiFailure> {
    let context = state.context();
    if context.user().await.is_none() {
        return Err(failure(StatusCode::UNAUTHORIZED, "You are not signed in"));
    }
    context
        .profile()
        .await
        .map(Json)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "No profile saved yet"))
}

/// Save the signed-in user's profile
///
/// Absent fields take their defaults
#[utoipa::path(
    put,
    path = "/api/v1/profile",
    tag = "matches",
    request_body = ProfileUpdate,
    responses(
        (status = 200, description = "Profile saved", body = MatchProfile),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 502, description = "Store unavailable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn save_profile<S: Store, A: AuthProvider + 'static>(
    State(state): State<AppState<S, A>>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<MatchProfile>, ApiFailure> {
    state
        .context()
        .save_profile(update)
        .await
        .map(Json)
        .map_err(context_failure)
}
