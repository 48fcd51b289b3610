//! In-memory store.
//!
//! Holds every table in process memory and applies the same filter, sort and
//! paginate rules as the hosted store. Seeded with the fixture datasets it is
//! the fallback source; empty it is the test double for the services.

mod fixtures;

#[cfg(test)]
mod memory_test;

use std::cmp::Reverse;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

pub use fixtures::{fixture_housing, fixture_jobs, fixture_profiles};

use crate::store::utils::{generate_entity_id, now};
use crate::store::{
    Donation, DonationRepository, HousingFilter, HousingRepository, HousingTour, Job,
    JobApplication, JobFilter, JobRepository, KNOWN_TABLES, MatchPreference, MatchProfile,
    NewDonation, NewJob, NewStory, Page, PageRequest, ProfileRepository, SeniorLiving, Store,
    StoreError, StoreResult, StoryRepository, SuccessStory, TourRequest, TourStatus,
};

#[derive(Default)]
struct Tables {
    jobs: Vec<Job>,
    job_sources: Vec<(String, String, String)>,
    job_applications: Vec<JobApplication>,
    senior_livings: Vec<SeniorLiving>,
    housing_tours: Vec<HousingTour>,
    match_profiles: Vec<MatchProfile>,
    donations: Vec<Donation>,
    success_stories: Vec<SuccessStory>,
}

/// In-memory implementation of [`Store`].
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    offline: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the fixed fixture datasets
    /// (5 jobs, 4 facilities, 6 match profiles), dated relative to now.
    pub fn with_fixtures() -> Self {
        let anchor = now();
        Self {
            tables: RwLock::new(Tables {
                jobs: fixture_jobs(anchor),
                senior_livings: fixture_housing(),
                match_profiles: fixture_profiles(anchor),
                ..Tables::default()
            }),
            offline: AtomicBool::new(false),
        }
    }

    /// Create a store whose every operation fails with a connection error.
    ///
    /// Stands in for an unreachable remote when exercising fallback paths.
    pub fn offline() -> Self {
        let store = Self::new();
        store.set_offline(true);
        store
    }

    /// Toggle simulated unavailability.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Connection {
                message: "in-memory store is offline".to_string(),
            });
        }
        Ok(())
    }

    /// Insert or replace jobs directly, bypassing the scraper path.
    pub async fn seed_jobs(&self, jobs: impl IntoIterator<Item = Job>) {
        let mut tables = self.tables.write().await;
        for job in jobs {
            tables.jobs.retain(|j| j.id != job.id);
            tables.jobs.push(job);
        }
    }

    /// Insert or replace facilities directly.
    pub async fn seed_housing(&self, homes: impl IntoIterator<Item = SeniorLiving>) {
        let mut tables = self.tables.write().await;
        for home in homes {
            tables.senior_livings.retain(|h| h.id != home.id);
            tables.senior_livings.push(home);
        }
    }

    /// Insert or replace stories directly, including published ones.
    pub async fn seed_stories(&self, stories: impl IntoIterator<Item = SuccessStory>) {
        let mut tables = self.tables.write().await;
        for story in stories {
            tables.success_stories.retain(|s| s.id != story.id);
            tables.success_stories.push(story);
        }
    }

    /// Insert donations directly, keeping their dates.
    pub async fn seed_donations(&self, donations: impl IntoIterator<Item = Donation>) {
        self.tables.write().await.donations.extend(donations);
    }

    /// Every stored story, published or not.
    pub async fn all_stories(&self) -> Vec<SuccessStory> {
        self.tables.read().await.success_stories.clone()
    }

    /// Every recorded job application.
    pub async fn job_applications(&self) -> Vec<JobApplication> {
        self.tables.read().await.job_applications.clone()
    }

    /// Every scheduled tour.
    pub async fn housing_tours(&self) -> Vec<HousingTour> {
        self.tables.read().await.housing_tours.clone()
    }
}

// =============================================================================
// JobRepository
// =============================================================================

/// Memory-backed job repository.
pub struct MemoryJobRepository<'a> {
    store: &'a MemoryStore,
}

impl JobRepository for MemoryJobRepository<'_> {
    async fn list(&self, page: &PageRequest, filter: &JobFilter) -> StoreResult<Page<Job>> {
        self.store.ensure_online()?;
        let tables = self.store.tables.read().await;
        let mut matching: Vec<Job> = tables
            .jobs
            .iter()
            .filter(|job| filter.matches(job))
            .cloned()
            .collect();
        matching.sort_by_key(|job| Reverse(job.posted_date));
        Ok(Page::slice(matching, page))
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Job>> {
        self.store.ensure_online()?;
        let tables = self.store.tables.read().await;
        Ok(tables.jobs.iter().find(|job| job.id == id).cloned())
    }

    async fn find_by_source(&self, source_name: &str, source_id: &str) -> StoreResult<Option<String>> {
        self.store.ensure_online()?;
        let tables = self.store.tables.read().await;
        Ok(tables
            .job_sources
            .iter()
            .find(|(name, sid, _)| name == source_name && sid == source_id)
            .map(|(_, _, job_id)| job_id.clone()))
    }

    async fn insert(&self, job: &NewJob) -> StoreResult<Job> {
        self.store.ensure_online()?;
        let mut tables = self.store.tables.write().await;
        let created = job.clone().into_job(generate_entity_id());
        tables.job_sources.push((
            job.source_name.clone(),
            job.source_id.clone(),
            created.id.clone(),
        ));
        tables.jobs.push(created.clone());
        Ok(created)
    }

    async fn record_application(&self, application: &JobApplication) -> StoreResult<()> {
        self.store.ensure_online()?;
        self.store
            .tables
            .write()
            .await
            .job_applications
            .push(application.clone());
        Ok(())
    }
}

// =============================================================================
// HousingRepository
// =============================================================================

/// Memory-backed housing repository.
pub struct MemoryHousingRepository<'a> {
    store: &'a MemoryStore,
}

impl HousingRepository for MemoryHousingRepository<'_> {
    async fn list(
        &self,
        page: &PageRequest,
        filter: &HousingFilter,
    ) -> StoreResult<Page<SeniorLiving>> {
        self.store.ensure_online()?;
        let tables = self.store.tables.read().await;
        let mut matching: Vec<SeniorLiving> = tables
            .senior_livings
            .iter()
            .filter(|home| filter.matches(home))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        Ok(Page::slice(matching, page))
    }

    async fn get(&self, id: &str) -> StoreResult<Option<SeniorLiving>> {
        self.store.ensure_online()?;
        let tables = self.store.tables.read().await;
        Ok(tables.senior_livings.iter().find(|h| h.id == id).cloned())
    }

    async fn schedule_tour(&self, request: &TourRequest) -> StoreResult<HousingTour> {
        self.store.ensure_online()?;
        let tour = HousingTour {
            id: generate_entity_id(),
            senior_living_id: request.senior_living_id.clone(),
            user_id: request.user_id.clone(),
            tour_date: request.tour_date.clone(),
            tour_time: request.tour_time.clone(),
            notes: request.notes.clone(),
            status: TourStatus::Scheduled,
            created_at: now(),
        };
        self.store
            .tables
            .write()
            .await
            .housing_tours
            .push(tour.clone());
        Ok(tour)
    }
}

// =============================================================================
// ProfileRepository
// =============================================================================

/// Memory-backed match profile repository.
pub struct MemoryProfileRepository<'a> {
    store: &'a MemoryStore,
}

impl ProfileRepository for MemoryProfileRepository<'_> {
    async fn list(
        &self,
        page: &PageRequest,
        preference: &MatchPreference,
    ) -> StoreResult<Page<MatchProfile>> {
        self.store.ensure_online()?;
        let tables = self.store.tables.read().await;
        let mut matching: Vec<MatchProfile> = tables
            .match_profiles
            .iter()
            .filter(|profile| preference.matches(profile))
            .cloned()
            .collect();
        matching.sort_by_key(|profile| Reverse(profile.last_active));
        Ok(Page::slice(matching, page))
    }

    async fn get(&self, id: &str) -> StoreResult<Option<MatchProfile>> {
        self.store.ensure_online()?;
        let tables = self.store.tables.read().await;
        Ok(tables.match_profiles.iter().find(|p| p.id == id).cloned())
    }

    async fn upsert(&self, profile: &MatchProfile) -> StoreResult<MatchProfile> {
        self.store.ensure_online()?;
        let mut stored = profile.clone();
        stored.compatibility_score = None;
        let mut tables = self.store.tables.write().await;
        tables.match_profiles.retain(|p| p.id != stored.id);
        tables.match_profiles.push(stored.clone());
        Ok(stored)
    }
}

// =============================================================================
// DonationRepository
// =============================================================================

/// Memory-backed donation repository.
pub struct MemoryDonationRepository<'a> {
    store: &'a MemoryStore,
}

impl DonationRepository for MemoryDonationRepository<'_> {
    async fn insert(&self, donation: &NewDonation) -> StoreResult<Donation> {
        self.store.ensure_online()?;
        let created = donation.clone().into_donation(generate_entity_id());
        self.store
            .tables
            .write()
            .await
            .donations
            .push(created.clone());
        Ok(created)
    }

    async fn recent(&self, limit: usize) -> StoreResult<Vec<Donation>> {
        self.store.ensure_online()?;
        let mut donations = self.store.tables.read().await.donations.clone();
        donations.sort_by_key(|d| Reverse(d.donation_date));
        donations.truncate(limit);
        Ok(donations)
    }

    async fn amounts_since(&self, since: DateTime<Utc>) -> StoreResult<Vec<u64>> {
        self.store.ensure_online()?;
        let tables = self.store.tables.read().await;
        Ok(tables
            .donations
            .iter()
            .filter(|d| d.donation_date >= since)
            .map(|d| d.amount)
            .collect())
    }

    async fn all_amounts(&self) -> StoreResult<Vec<u64>> {
        self.store.ensure_online()?;
        let tables = self.store.tables.read().await;
        Ok(tables.donations.iter().map(|d| d.amount).collect())
    }
}

// =============================================================================
// StoryRepository
// =============================================================================

/// Memory-backed story repository.
pub struct MemoryStoryRepository<'a> {
    store: &'a MemoryStore,
}

impl StoryRepository for MemoryStoryRepository<'_> {
    async fn published(&self) -> StoreResult<Vec<SuccessStory>> {
        self.store.ensure_online()?;
        let tables = self.store.tables.read().await;
        let mut stories: Vec<SuccessStory> = tables
            .success_stories
            .iter()
            .filter(|s| s.published)
            .cloned()
            .collect();
        stories.sort_by_key(|s| Reverse(s.submission_date));
        Ok(stories)
    }

    async fn insert(&self, story: &NewStory) -> StoreResult<SuccessStory> {
        self.store.ensure_online()?;
        let created = story.clone().into_story(generate_entity_id(), now());
        self.store
            .tables
            .write()
            .await
            .success_stories
            .push(created.clone());
        Ok(created)
    }
}

// =============================================================================
// Store
// =============================================================================

impl Store for MemoryStore {
    type Jobs<'a> = MemoryJobRepository<'a>;
    type Housing<'a> = MemoryHousingRepository<'a>;
    type Profiles<'a> = MemoryProfileRepository<'a>;
    type Donations<'a> = MemoryDonationRepository<'a>;
    type Stories<'a> = MemoryStoryRepository<'a>;

    async fn ping(&self) -> StoreResult<()> {
        self.ensure_online()
    }

    async fn count(&self, table: &str) -> StoreResult<u64> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        let count = match table {
            "jobs" => tables.jobs.len(),
            "senior_livings" => tables.senior_livings.len(),
            "match_profiles" => tables.match_profiles.len(),
            "job_applications" => tables.job_applications.len(),
            "housing_tours" => tables.housing_tours.len(),
            "donations" => tables.donations.len(),
            "success_stories" => tables.success_stories.len(),
            // Known but not modelled in memory.
            other if KNOWN_TABLES.contains(&other) => 0,
            other => {
                return Err(StoreError::NotFound {
                    entity_type: "Table".to_string(),
                    id: other.to_string(),
                });
            }
        };
        Ok(count as u64)
    }

    fn jobs(&self) -> Self::Jobs<'_> {
        MemoryJobRepository { store: self }
    }

    fn housing(&self) -> Self::Housing<'_> {
        MemoryHousingRepository { store: self }
    }

    fn profiles(&self) -> Self::Profiles<'_> {
        MemoryProfileRepository { store: self }
    }

    fn donations(&self) -> Self::Donations<'_> {
        MemoryDonationRepository { store: self }
    }

    fn stories(&self) -> Self::Stories<'_> {
        MemoryStoryRepository { store: self }
    }
}
