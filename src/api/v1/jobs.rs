//! Job listing handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};

use super::{DEFAULT_PAGE_SIZE, split_list};
use crate::api::AppState;
use crate::api::error::{ApiFailure, ErrorResponse, bad_request, failure, store_failure};
use crate::auth::AuthProvider;
use crate::services::jobs;
use crate::store::{Job, JobFilter, JobType, Page, PageRequest, Store};

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListJobsQuery {
    /// Page number, starting at 1
    #[param(example = 1)]
    pub page: Option<usize>,
    /// Items per page
    #[param(example = 10)]
    pub page_size: Option<usize>,
    /// Location substring
    #[param(example = "Bangalore")]
    pub location: Option<String>,
    /// Employment type (Full-time, Part-time, Contract, Remote, Internship)
    #[serde(rename = "type")]
    #[param(example = "Full-time")]
    pub job_type: Option<String>,
    /// Substring of title or description
    pub keyword: Option<String>,
    /// Comma-separated accommodations, any of which must be offered
    #[param(example = "Wheelchair accessible,Screen reader compatible")]
    pub accessibility: Option<String>,
}

impl ListJobsQuery {
    fn filter(&self) -> Result<JobFilter, ApiFailure> {
        let job_type = self
            .job_type
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .map(str::parse::<JobType>)
            .transpose()
            .map_err(bad_request)?;
        Ok(JobFilter {
            location: self.location.clone(),
            job_type,
            keyword: self.keyword.clone(),
            accessibility: split_list(self.accessibility.as_deref()),
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ApplyRequest {
    /// Applicant, when known
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApplyResponse {
    #[schema(example = "https://techsolutions.in/careers/accessibility-specialist")]
    pub application_url: String,
    /// Whether the application was recorded
    pub tracked: bool,
}

/// List jobs
///
/// Returns a filtered page of jobs, newest posting first
#[utoipa::path(
    get,
    path = "/api/v1/jobs",
    tag = "jobs",
    params(ListJobsQuery),
    responses(
        (status = 200, description = "Page of jobs", body = Page<Job>),
        (status = 400, description = "Invalid filter or page", body = ErrorResponse),
        (status = 502, description = "Store unavailable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_jobs<S: Store, A: AuthProvider + 'static>(
    State(state): State<AppState<S, A>>,
    Query(query): Query<ListJobsQuery>,
) -> Result<Json<Page<Job>>, ApiFailure> {
    let page = PageRequest::from_parts(query.page, query.page_size, DEFAULT_PAGE_SIZE)
        .map_err(store_failure)?;
    let filter = query.filter()?;
    jobs::fetch_jobs(state.store(), &page, &filter)
        .await
        .map(Json)
        .map_err(store_failure)
}

/// Get a job by ID
#[utoipa::path(
    get,
    path = "/api/v1/jobs/{id}",
    tag = "jobs",
    params(("id" = String, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job found", body = Job),
        (status = 404, description = "Job not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_job<S: Store, A: AuthProvider + 'static>(
    State(state): State<AppState<S, A>>,
    Path(id): Path<String>,
) -> Result<Json<Job>, ApiFailure> {
    match jobs::fetch_job_by_id(state.store(), &id).await {
        Ok(Some(job)) => Ok(Json(job)),
        Ok(None) => Err(failure(
            axum::http::StatusCode::NOT_FOUND,
            format!("Job '{}' not found", id),
        )),
        Err(e) => Err(store_failure(e)),
    }
}

/// Apply for a job
///
/// Records the application and returns the employer's application URL.
/// Without a `user_id` the signed-in user, if any, is recorded.
#[utoipa::path(
    post,
    path = "/api/v1/jobs/{id}/apply",
    tag = "jobs",
    params(("id" = String, Path, description = "Job ID")),
    request_body = ApplyRequest,
    responses(
        (status = 200, description = "Application URL", body = ApplyResponse),
        (status = 404, description = "Job not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn apply_for_job<S: Store, A: AuthProvider + 'static>(
    State(state): State<AppState<S, A>>,
    Path(id): Path<String>,
    body: Option<Json<ApplyRequest>>,
) -> Result<Json<ApplyResponse>, ApiFailure> {
    let application_url = jobs::apply_for_job(state.store(), &id)
        .await
        .map_err(store_failure)?;

    let user_id = match body.and_then(|Json(b)| b.user_id) {
        Some(user_id) => Some(user_id),
        None => state.context().user().await.map(|u| u.id),
    };
    let tracked = jobs::track_job_application(state.store(), &id, user_id.as_deref()).await;

    Ok(Json(ApplyResponse {
        application_url,
        tracked,
    }))
}
