//! Admin dashboard handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::api::AppState;
use crate::auth::AuthProvider;
use crate::services::admin;
use crate::services::scraper::{ScrapeReport, ScraperStatus};
use crate::store::{Store, TableStatus};

/// Existence and row count of every portal table
#[utoipa::path(
    get,
    path = "/api/v1/admin/tables",
    tag = "admin",
    responses((status = 200, description = "Table statuses", body = Vec<TableStatus>))
)]
#[instrument(skip(state))]
pub async fn table_statuses<S: Store, A: AuthProvider + 'static>(
    State(state): State<AppState<S, A>>,
) -> Json<Vec<TableStatus>> {
    Json(admin::table_statuses(state.store()).await)
}

/// Run the job scraper once
#[utoipa::path(
    post,
    path = "/api/v1/admin/scrape",
    tag = "admin",
    responses((status = 200, description = "Scraper outcome", body = ScrapeReport))
)]
#[instrument(skip(state))]
pub async fn trigger_scrape<S: Store, A: AuthProvider + 'static>(
    State(state): State<AppState<S, A>>,
) -> Json<ScrapeReport> {
    Json(state.scraper().trigger_job_scraping(state.store()).await)
}

/// Scraper sites and the outcome of the last run
#[utoipa::path(
    get,
    path = "/api/v1/admin/scraper",
    tag = "admin",
    responses((status = 200, description = "Scraper status", body = ScraperStatus))
)]
#[instrument(skip(state))]
pub async fn scraper_status<S: Store, A: AuthProvider + 'static>(
    State(state): State<AppState<S, A>>,
) -> Json<ScraperStatus> {
    Json(state.scraper().status().await)
}
