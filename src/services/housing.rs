//! Senior living directory.

use tracing::{error, info};

use super::error::{SubmissionError, require};
use crate::store::{
    HousingFilter, HousingRepository, HousingTour, Page, PageRequest, SeniorLiving, Store,
    StoreResult, TourRequest,
};

/// Filtered page of facilities, highest rated first.
pub async fn fetch_senior_livings<S: Store>(
    store: &S,
    page: &PageRequest,
    filter: &HousingFilter,
) -> StoreResult<Page<SeniorLiving>> {
    store.housing().list(page, filter).await.inspect_err(|e| {
        error!(error = %e, "Error fetching senior livings");
    })
}

pub async fn fetch_senior_living_by_id<S: Store>(
    store: &S,
    id: &str,
) -> StoreResult<Option<SeniorLiving>> {
    store.housing().get(id).await
}

/// Book a visit to a facility.
pub async fn schedule_tour<S: Store>(
    store: &S,
    request: &TourRequest,
) -> Result<HousingTour, SubmissionError> {
    require("senior_living_id", &request.senior_living_id)?;
    require("user_id", &request.user_id)?;
    require("tour_date", &request.tour_date)?;
    require("tour_time", &request.tour_time)?;

    let tour = store
        .housing()
        .schedule_tour(request)
        .await
        .map_err(|e| {
            error!(error = %e, "Error scheduling tour");
            SubmissionError::remote("There was an error scheduling your tour. Please try again.", e)
        })?;
    info!(tour_id = %tour.id, facility = %tour.senior_living_id, "Tour scheduled");
    Ok(tour)
}
