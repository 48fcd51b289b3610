//! Donation handlers.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;
use utoipa::IntoParams;

use crate::api::AppState;
use crate::api::error::{ApiFailure, ErrorResponse, submission_failure};
use crate::auth::AuthProvider;
use crate::services::donations::{
    self, DonationForm, DonationReceipt, ImpactStats, MonthlyDonations, RecentDonation,
    RecentDonor,
};
use crate::store::Store;

const RECENT_DONATIONS: usize = 3;
const RECENT_DONORS: usize = 5;
const MAX_FEED: usize = 50;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct FeedQuery {
    /// Number of entries, at most 50
    #[param(example = 5)]
    pub limit: Option<usize>,
}

impl FeedQuery {
    fn limit_or(&self, default: usize) -> usize {
        self.limit.unwrap_or(default).clamp(1, MAX_FEED)
    }
}

/// Submit a donation
#[utoipa::path(
    post,
    path = "/api/v1/donations",
    tag = "donations",
    request_body = DonationForm,
    responses(
        (status = 201, description = "Donation recorded", body = DonationReceipt),
        (status = 400, description = "Invalid amount or missing field", body = ErrorResponse),
        (status = 502, description = "Store unavailable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn submit_donation<S: Store, A: AuthProvider + 'static>(
    State(state): State<AppState<S, A>>,
    Json(form): Json<DonationForm>,
) -> Result<(StatusCode, Json<DonationReceipt>), ApiFailure> {
    let receipt = donations::submit_donation(state.store(), &form)
        .await
        .map_err(submission_failure)?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

/// Latest donations, anonymous donors hidden
#[utoipa::path(
    get,
    path = "/api/v1/donations/recent",
    tag = "donations",
    params(FeedQuery),
    responses((status = 200, description = "Recent donations", body = Vec<RecentDonation>))
)]
#[instrument(skip(state))]
pub async fn recent_donations<S: Store, A: AuthProvider + 'static>(
    State(state): State<AppState<S, A>>,
    Query(query): Query<FeedQuery>,
) -> Json<Vec<RecentDonation>> {
    Json(donations::recent_donations(state.store(), query.limit_or(RECENT_DONATIONS)).await)
}

/// Donor wall entries with messages
#[utoipa::path(
    get,
    path = "/api/v1/donations/donors",
    tag = "donations",
    params(FeedQuery),
    responses((status = 200, description = "Recent donors", body = Vec<RecentDonor>))
)]
#[instrument(skip(state))]
pub async fn recent_donors<S: Store, A: AuthProvider + 'static>(
    State(state): State<AppState<S, A>>,
    Query(query): Query<FeedQuery>,
) -> Json<Vec<RecentDonor>> {
    Json(donations::recent_donors(state.store(), query.limit_or(RECENT_DONORS)).await)
}

/// Total raised this calendar month against the target
#[utoipa::path(
    get,
    path = "/api/v1/donations/monthly",
    tag = "donations",
    responses((status = 200, description = "Monthly progress", body = MonthlyDonations))
)]
#[instrument(skip(state))]
pub async fn monthly_donations<S: Store, A: AuthProvider + 'static>(
    State(state): State<AppState<S, A>>,
) -> Json<MonthlyDonations> {
    Json(donations::monthly_donations(state.store()).await)
}

/// Impact implied by all donations so far
#[utoipa::path(
    get,
    path = "/api/v1/donations/impact",
    tag = "donations",
    responses((status = 200, description = "Impact statistics", body = ImpactStats))
)]
#[instrument(skip(state))]
pub async fn impact_stats<S: Store, A: AuthProvider + 'static>(
    State(state): State<AppState<S, A>>,
) -> Json<ImpactStats> {
    Json(donations::impact_stats(state.store()).await)
}
