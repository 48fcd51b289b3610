//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing the hosted
//! store, the fixture store and the fallback decorator to be swapped without
//! changing the services.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::store::{
    StoreResult,
    models::{
        Donation, HousingFilter, HousingTour, Job, JobApplication, JobFilter, MatchPreference,
        MatchProfile, NewDonation, NewJob, NewStory, Page, PageRequest, SeniorLiving,
        SuccessStory, TourRequest,
    },
};

/// Repository for job postings (`jobs`, `job_applications`).
pub trait JobRepository: Send + Sync {
    /// Filtered page of jobs, newest posting first.
    fn list(
        &self,
        page: &PageRequest,
        filter: &JobFilter,
    ) -> impl Future<Output = StoreResult<Page<Job>>> + Send;

    /// Get a job by ID. Absent ids yield `Ok(None)`.
    fn get(&self, id: &str) -> impl Future<Output = StoreResult<Option<Job>>> + Send;

    /// Look up a scraped posting by its origin.
    fn find_by_source(
        &self,
        source_name: &str,
        source_id: &str,
    ) -> impl Future<Output = StoreResult<Option<String>>> + Send;

    /// Insert a scraped posting.
    fn insert(&self, job: &NewJob) -> impl Future<Output = StoreResult<Job>> + Send;

    /// Record an application click-through.
    fn record_application(
        &self,
        application: &JobApplication,
    ) -> impl Future<Output = StoreResult<()>> + Send;
}

/// Repository for senior living facilities (`senior_livings`, `housing_tours`).
pub trait HousingRepository: Send + Sync {
    /// Filtered page of facilities, highest rating first.
    fn list(
        &self,
        page: &PageRequest,
        filter: &HousingFilter,
    ) -> impl Future<Output = StoreResult<Page<SeniorLiving>>> + Send;

    /// Get a facility by ID. Absent ids yield `Ok(None)`.
    fn get(&self, id: &str) -> impl Future<Output = StoreResult<Option<SeniorLiving>>> + Send;

    /// Store a tour request with status `scheduled`.
    fn schedule_tour(
        &self,
        request: &TourRequest,
    ) -> impl Future<Output = StoreResult<HousingTour>> + Send;
}

/// Repository for match profiles (`match_profiles`).
pub trait ProfileRepository: Send + Sync {
    /// Profiles satisfying the preference, most recently active first.
    ///
    /// Scores are not computed here.
    fn list(
        &self,
        page: &PageRequest,
        preference: &MatchPreference,
    ) -> impl Future<Output = StoreResult<Page<MatchProfile>>> + Send;

    /// Get a profile by ID. Absent ids yield `Ok(None)`.
    fn get(&self, id: &str) -> impl Future<Output = StoreResult<Option<MatchProfile>>> + Send;

    /// Insert or replace the profile with the same id.
    fn upsert(
        &self,
        profile: &MatchProfile,
    ) -> impl Future<Output = StoreResult<MatchProfile>> + Send;
}

/// Repository for donations (`donations`).
pub trait DonationRepository: Send + Sync {
    /// Insert a donation and return it with its assigned id.
    fn insert(&self, donation: &NewDonation) -> impl Future<Output = StoreResult<Donation>> + Send;

    /// Most recent donations, newest first.
    fn recent(&self, limit: usize) -> impl Future<Output = StoreResult<Vec<Donation>>> + Send;

    /// Amounts of all donations made at or after `since`.
    fn amounts_since(
        &self,
        since: DateTime<Utc>,
    ) -> impl Future<Output = StoreResult<Vec<u64>>> + Send;

    /// Amounts of every donation on record.
    fn all_amounts(&self) -> impl Future<Output = StoreResult<Vec<u64>>> + Send;
}

/// Repository for success stories (`success_stories`).
pub trait StoryRepository: Send + Sync {
    /// Published stories, newest submission first.
    fn published(&self) -> impl Future<Output = StoreResult<Vec<SuccessStory>>> + Send;

    /// Insert a story; it is stored unpublished.
    fn insert(&self, story: &NewStory) -> impl Future<Output = StoreResult<SuccessStory>> + Send;
}

/// Combined store interface.
///
/// Uses associated types for the repositories, avoiding dynamic dispatch.
pub trait Store: Send + Sync + 'static {
    type Jobs<'a>: JobRepository + 'a
    where
        Self: 'a;
    type Housing<'a>: HousingRepository + 'a
    where
        Self: 'a;
    type Profiles<'a>: ProfileRepository + 'a
    where
        Self: 'a;
    type Donations<'a>: DonationRepository + 'a
    where
        Self: 'a;
    type Stories<'a>: StoryRepository + 'a
    where
        Self: 'a;

    /// Explicit connectivity check, run once at startup.
    fn ping(&self) -> impl Future<Output = StoreResult<()>> + Send;

    /// Row count of a table; errors when the table is missing or unreadable.
    fn count(&self, table: &str) -> impl Future<Output = StoreResult<u64>> + Send;

    /// Get the job repository.
    fn jobs(&self) -> Self::Jobs<'_>;

    /// Get the housing repository.
    fn housing(&self) -> Self::Housing<'_>;

    /// Get the profile repository.
    fn profiles(&self) -> Self::Profiles<'_>;

    /// Get the donation repository.
    fn donations(&self) -> Self::Donations<'_>;

    /// Get the story repository.
    fn stories(&self) -> Self::Stories<'_>;
}
