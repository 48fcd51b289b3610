//! Job listings.

use tracing::{error, info};

use crate::store::utils::now;
use crate::store::{
    Job, JobApplication, JobFilter, JobRepository, Page, PageRequest, Store, StoreError,
    StoreResult,
};

/// Filtered page of jobs, newest posting first.
pub async fn fetch_jobs<S: Store>(
    store: &S,
    page: &PageRequest,
    filter: &JobFilter,
) -> StoreResult<Page<Job>> {
    store.jobs().list(page, filter).await.inspect_err(|e| {
        error!(error = %e, "Error fetching jobs");
    })
}

/// A single job; absent ids yield `None`.
pub async fn fetch_job_by_id<S: Store>(store: &S, id: &str) -> StoreResult<Option<Job>> {
    store.jobs().get(id).await
}

/// Resolve where a candidate applies for `job_id`.
pub async fn apply_for_job<S: Store>(store: &S, job_id: &str) -> StoreResult<String> {
    let job = fetch_job_by_id(store, job_id)
        .await?
        .ok_or_else(|| StoreError::NotFound {
            entity_type: "Job".to_string(),
            id: job_id.to_string(),
        })?;
    Ok(job.application_url)
}

/// Record an application click-through. Never fails the caller.
pub async fn track_job_application<S: Store>(
    store: &S,
    job_id: &str,
    user_id: Option<&str>,
) -> bool {
    let application = JobApplication {
        job_id: job_id.to_string(),
        user_id: user_id.map(str::to_string),
        applied_at: now(),
    };
    match store.jobs().record_application(&application).await {
        Ok(()) => {
            info!(
                job_id,
                user = user_id.unwrap_or("anonymous"),
                "Recorded job application"
            );
            true
        }
        Err(e) => {
            error!(job_id, error = %e, "Error tracking job application");
            false
        }
    }
}
