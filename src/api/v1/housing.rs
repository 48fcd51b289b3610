//! Senior living directory handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};

use super::{DEFAULT_PAGE_SIZE, split_list};
use crate::api::AppState;
use crate::api::error::{
    ApiFailure, ErrorResponse, bad_request, failure, store_failure, submission_failure,
};
use crate::auth::AuthProvider;
use crate::services::housing;
use crate::store::{
    HousingFilter, HousingTour, HousingType, Page, PageRequest, PriceRange, SeniorLiving, Store,
    TourRequest,
};

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListHousingQuery {
    #[param(example = 1)]
    pub page: Option<usize>,
    #[param(example = 10)]
    pub page_size: Option<usize>,
    /// Location substring
    #[param(example = "Pune")]
    pub location: Option<String>,
    /// Facility type, e.g. "Assisted Living"
    #[serde(rename = "type")]
    pub housing_type: Option<String>,
    /// Monthly price range, "min-max" or "min"
    #[param(example = "30000-60000")]
    pub price: Option<String>,
    /// Comma-separated amenities, all of which must be offered
    pub amenities: Option<String>,
    /// Comma-separated accommodations, any of which must be offered
    pub accessibility: Option<String>,
}

impl ListHousingQuery {
    fn filter(&self) -> Result<HousingFilter, ApiFailure> {
        let housing_type = self
            .housing_type
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .map(str::parse::<HousingType>)
            .transpose()
            .map_err(bad_request)?;
        let price = self
            .price
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(str::parse::<PriceRange>)
            .transpose()
            .map_err(bad_request)?;
        Ok(HousingFilter {
            location: self.location.clone(),
            housing_type,
            price,
            amenities: split_list(self.amenities.as_deref()),
            accessibility: split_list(self.accessibility.as_deref()),
        })
    }
}

/// Tour booking request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct ScheduleTourRequest {
    /// Visitor; defaults to the signed-in user
    pub user_id: Option<String>,
    #[schema(example = "2025-06-01")]
    pub tour_date: String,
    #[schema(example = "10:30")]
    pub tour_time: String,
    #[serde(default)]
    pub notes: String,
}

/// List senior living facilities
///
/// Returns a filtered page of facilities, highest rated first
#[utoipa::path(
    get,
    path = "/api/v1/housing",
    tag = "housing",
    params(ListHousingQuery),
    responses(
        (status = 200, description = "Page of facilities", body = Page<SeniorLiving>),
        (status = 400, description = "Invalid filter or page", body = ErrorResponse),
        (status = 502, description = "Store unavailable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_housing<S: Store, A: AuthProvider + 'static>(
    State(state): State<AppState<S, A>>,
    Query(query): Query<ListHousingQuery>,
) -> Result<Json<Page<SeniorLiving>>, ApiFailure> {
    let page = PageRequest::from_parts(query.page, query.page_size, DEFAULT_PAGE_SIZE)
        .map_err(store_failure)?;
    let filter = query.filter()?;
    housing::fetch_senior_livings(state.store(), &page, &filter)
        .await
        .map(Json)
        .map_err(store_failure)
}

/// Get a facility by ID
#[utoipa::path(
    get,
    path = "/api/v1/housing/{id}",
    tag = "housing",
    params(("id" = String, Path, description = "Facility ID")),
    responses(
        (status = 200, description = "Facility found", body = SeniorLiving),
        (status = 404, description = "Facility not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_housing<S: Store, A: AuthProvider + 'static>(
    State(state): State<AppState<S, A>>,
    Path(id): Path<String>,
) -> Result<Json<SeniorLiving>, ApiFailure> {
    match housing::fetch_senior_living_by_id(state.store(), &id).await {
        Ok(Some(home)) => Ok(Json(home)),
        Ok(None) => Err(failure(
            StatusCode::NOT_FOUND,
            format!("Senior living '{}' not found", id),
        )),
        Err(e) => Err(store_failure(e)),
    }
}

/// Schedule a tour
#[utoipa::path(
    post,
    path = "/api/v1/housing/{id}/tours",
    tag = "housing",
    params(("id" = String, Path, description = "Facility ID")),
    request_body = ScheduleTourRequest,
    responses(
        (status = 201, description = "Tour scheduled", body = HousingTour),
        (status = 400, description = "Missing field", body = ErrorResponse),
        (status = 502, description = "Store unavailable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn schedule_tour<S: Store, A: AuthProvider + 'static>(
    State(state): State<AppState<S, A>>,
    Path(id): Path<String>,
    Json(body): Json<ScheduleTourRequest>,
) -> Result<(StatusCode, Json<HousingTour>), ApiFailure> {
    let user_id = match body.user_id {
        Some(user_id) => user_id,
        None => state
            .context()
            .user()
            .await
            .map(|u| u.id)
            .unwrap_or_default(),
    };
    let request = TourRequest {
        senior_living_id: id,
        user_id,
        tour_date: body.tour_date,
        tour_time: body.tour_time,
        notes: body.notes,
    };
    let tour = housing::schedule_tour(state.store(), &request)
        .await
        .map_err(submission_failure)?;
    Ok((StatusCode::CREATED, Json(tour)))
}
