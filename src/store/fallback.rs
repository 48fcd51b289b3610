//! Fixture fallback decorator.
//!
//! Wraps a primary store and a fixture store. Reads of jobs, housing and
//! profiles go to the primary first and are answered from the fixtures when:
//!
//! - the primary fails with a remote-side error, or
//! - the primary returns no rows for page 1 with an empty filter.
//!
//! An empty primary result on a later page, or under a filter, is returned
//! as an empty page. Writes always go to the primary.

use std::future::Future;

use tracing::{info, warn};

use crate::store::{
    HousingFilter, HousingRepository, HousingTour, Job, JobApplication, JobFilter, JobRepository,
    MatchPreference, MatchProfile, NewJob, Page, PageRequest, ProfileRepository, SeniorLiving,
    Store, StoreResult, TourRequest,
};

/// Store decorator substituting fixtures for an unavailable or empty primary.
pub struct FallbackStore<P, F> {
    primary: P,
    fixtures: F,
    enabled: bool,
}

impl<P: Store, F: Store> FallbackStore<P, F> {
    /// Wrap `primary`, falling back to `fixtures` when `enabled`.
    ///
    /// With `enabled == false` the decorator is a pass-through, so primary
    /// outages surface as errors instead of sample data.
    pub fn new(primary: P, fixtures: F, enabled: bool) -> Self {
        Self {
            primary,
            fixtures,
            enabled,
        }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn fixtures(&self) -> &F {
        &self.fixtures
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

async fn list_with_fallback<T, PF, FF>(
    entity: &'static str,
    enabled: bool,
    empty_page_eligible: bool,
    primary: PF,
    fixtures: impl FnOnce() -> FF,
) -> StoreResult<Page<T>>
where
    PF: Future<Output = StoreResult<Page<T>>>,
    FF: Future<Output = StoreResult<Page<T>>>,
{
    match primary.await {
        Ok(page) if enabled && empty_page_eligible && page.total_items == 0 => {
            info!(entity, "No rows in primary store, falling back to fixtures");
            fixtures().await
        }
        Ok(page) => Ok(page),
        Err(e) if enabled && e.is_remote_failure() => {
            warn!(entity, error = %e, "Primary store failed, falling back to fixtures");
            fixtures().await
        }
        Err(e) => Err(e),
    }
}

async fn get_with_fallback<T, PF, FF>(
    entity: &'static str,
    enabled: bool,
    primary: PF,
    fixtures: impl FnOnce() -> FF,
) -> StoreResult<Option<T>>
where
    PF: Future<Output = StoreResult<Option<T>>>,
    FF: Future<Output = StoreResult<Option<T>>>,
{
    match primary.await {
        Ok(Some(found)) => Ok(Some(found)),
        Ok(None) if enabled => fixtures().await,
        Ok(None) => Ok(None),
        Err(e) if enabled && e.is_remote_failure() => {
            warn!(entity, error = %e, "Primary store failed, looking up fixtures");
            fixtures().await
        }
        Err(e) => Err(e),
    }
}

// =============================================================================
// Repositories
// =============================================================================

/// Job repository with fixture fallback on reads.
pub struct FallbackJobRepository<'a, P: Store + 'a, F: Store + 'a> {
    primary: P::Jobs<'a>,
    fixtures: F::Jobs<'a>,
    enabled: bool,
}

impl<'a, P: Store + 'a, F: Store + 'a> JobRepository for FallbackJobRepository<'a, P, F> {
    async fn list(&self, page: &PageRequest, filter: &JobFilter) -> StoreResult<Page<Job>> {
        list_with_fallback(
            "jobs",
            self.enabled,
            page.is_first() && filter.is_empty(),
            self.primary.list(page, filter),
            || self.fixtures.list(page, filter),
        )
        .await
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Job>> {
        get_with_fallback("jobs", self.enabled, self.primary.get(id), || {
            self.fixtures.get(id)
        })
        .await
    }

    async fn find_by_source(&self, source_name: &str, source_id: &str) -> StoreResult<Option<String>> {
        self.primary.find_by_source(source_name, source_id).await
    }

    async fn insert(&self, job: &NewJob) -> StoreResult<Job> {
        self.primary.insert(job).await
    }

    async fn record_application(&self, application: &JobApplication) -> StoreResult<()> {
        self.primary.record_application(application).await
    }
}

/// Housing repository with fixture fallback on reads.
pub struct FallbackHousingRepository<'a, P: Store + 'a, F: Store + 'a> {
    primary: P::Housing<'a>,
    fixtures: F::Housing<'a>,
    enabled: bool,
}

impl<'a, P: Store + 'a, F: Store + 'a> HousingRepository for FallbackHousingRepository<'a, P, F> {
    async fn list(
        &self,
        page: &PageRequest,
        filter: &HousingFilter,
    ) -> StoreResult<Page<SeniorLiving>> {
        list_with_fallback(
            "senior_livings",
            self.enabled,
            page.is_first() && filter.is_empty(),
            self.primary.list(page, filter),
            || self.fixtures.list(page, filter),
        )
        .await
    }

    async fn get(&self, id: &str) -> StoreResult<Option<SeniorLiving>> {
        get_with_fallback("senior_livings", self.enabled, self.primary.get(id), || {
            self.fixtures.get(id)
        })
        .await
    }

    async fn schedule_tour(&self, request: &TourRequest) -> StoreResult<HousingTour> {
        self.primary.schedule_tour(request).await
    }
}

/// Profile repository with fixture fallback on reads.
pub struct FallbackProfileRepository<'a, P: Store + 'a, F: Store + 'a> {
    primary: P::Profiles<'a>,
    fixtures: F::Profiles<'a>,
    enabled: bool,
}

impl<'a, P: Store + 'a, F: Store + 'a> ProfileRepository for FallbackProfileRepository<'a, P, F> {
    async fn list(
        &self,
        page: &PageRequest,
        preference: &MatchPreference,
    ) -> StoreResult<Page<MatchProfile>> {
        list_with_fallback(
            "match_profiles",
            self.enabled,
            page.is_first() && preference.is_empty(),
            self.primary.list(page, preference),
            || self.fixtures.list(page, preference),
        )
        .await
    }

    async fn get(&self, id: &str) -> StoreResult<Option<MatchProfile>> {
        get_with_fallback("match_profiles", self.enabled, self.primary.get(id), || {
            self.fixtures.get(id)
        })
        .await
    }

    async fn upsert(&self, profile: &MatchProfile) -> StoreResult<MatchProfile> {
        self.primary.upsert(profile).await
    }
}

// =============================================================================
// Store
// =============================================================================

impl<P: Store, F: Store> Store for FallbackStore<P, F> {
    type Jobs<'a>
        = FallbackJobRepository<'a, P, F>
    where
        Self: 'a;
    type Housing<'a>
        = FallbackHousingRepository<'a, P, F>
    where
        Self: 'a;
    type Profiles<'a>
        = FallbackProfileRepository<'a, P, F>
    where
        Self: 'a;
    type Donations<'a>
        = P::Donations<'a>
    where
        Self: 'a;
    type Stories<'a>
        = P::Stories<'a>
    where
        Self: 'a;

    async fn ping(&self) -> StoreResult<()> {
        self.primary.ping().await
    }

    async fn count(&self, table: &str) -> StoreResult<u64> {
        self.primary.count(table).await
    }

    fn jobs(&self) -> Self::Jobs<'_> {
        FallbackJobRepository {
            primary: self.primary.jobs(),
            fixtures: self.fixtures.jobs(),
            enabled: self.enabled,
        }
    }

    fn housing(&self) -> Self::Housing<'_> {
        FallbackHousingRepository {
            primary: self.primary.housing(),
            fixtures: self.fixtures.housing(),
            enabled: self.enabled,
        }
    }

    fn profiles(&self) -> Self::Profiles<'_> {
        FallbackProfileRepository {
            primary: self.primary.profiles(),
            fixtures: self.fixtures.profiles(),
            enabled: self.enabled,
        }
    }

    fn donations(&self) -> Self::Donations<'_> {
        self.primary.donations()
    }

    fn stories(&self) -> Self::Stories<'_> {
        self.primary.stories()
    }
}
