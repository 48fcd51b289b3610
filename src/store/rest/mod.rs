//! Hosted relational store accessed over its REST table interface.

mod client;
mod query;
mod rows;


use chrono::{DateTime, Utc};

pub use client::{RestClient, Rows};
pub use query::TableQuery;

use crate::config::StoreCredentials;
use crate::store::utils::{non_blank, now};
use crate::store::{
    Donation, DonationRepository, HousingFilter, HousingRepository, HousingTour, Job,
    JobApplication, JobFilter, JobRepository, MatchPreference, MatchProfile, NewDonation, NewJob,
    NewStory, Page, PageRequest, ProfileRepository, SeniorLiving, Store, StoreResult,
    StoryRepository, SuccessStory, TourRequest,
};
use rows::{
    AmountRow, DonationInsert, DonationRow, IdRow, JobApplicationInsert, JobInsert, JobRow,
    ProfileRow, SeniorLivingRow, StoryInsert, StoryRow, TourInsert, TourRow,
};

/// Store backed by the hosted database.
#[derive(Clone)]
pub struct RestStore {
    client: RestClient,
}

impl RestStore {
    /// Create a store; without credentials every call fails with
    /// `CredentialsMissing`.
    pub fn new(credentials: Option<StoreCredentials>) -> Self {
        Self {
            client: RestClient::new(credentials),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    pub fn client(&self) -> &RestClient {
        &self.client
    }
}

/// Apply a job filter to a select.
pub fn job_query<'a>(query: TableQuery<'a>, filter: &JobFilter) -> TableQuery<'a> {
    let mut query = query;
    if let Some(location) = non_blank(&filter.location) {
        query = query.ilike("location", location);
    }
    if let Some(job_type) = filter.job_type {
        query = query.eq("type", job_type);
    }
    if let Some(keyword) = non_blank(&filter.keyword) {
        query = query.any_ilike(&["title", "description"], keyword);
    }
    if !filter.accessibility.is_empty() {
        query = query.overlaps("accessibility", &filter.accessibility);
    }
    query
}

/// Apply a housing filter to a select.
pub fn housing_query<'a>(query: TableQuery<'a>, filter: &HousingFilter) -> TableQuery<'a> {
    let mut query = query;
    if let Some(location) = non_blank(&filter.location) {
        query = query.ilike("location", location);
    }
    if let Some(housing_type) = filter.housing_type {
        query = query.eq("type", housing_type);
    }
    if let Some(range) = filter.price {
        query = query.gte("price_numeric", range.min);
        if let Some(max) = range.max {
            query = query.lte("price_numeric", max);
        }
    }
    if !filter.amenities.is_empty() {
        query = query.contains_all("amenities", &filter.amenities);
    }
    if !filter.accessibility.is_empty() {
        query = query.overlaps("accessibility", &filter.accessibility);
    }
    query
}

/// Apply a match preference to a select.
pub fn profile_query<'a>(query: TableQuery<'a>, preference: &MatchPreference) -> TableQuery<'a> {
    let mut query = query;
    if let Some(range) = preference.age_range {
        query = query.gte("age", range.min).lte("age", range.max);
    }
    if !preference.gender.is_empty() {
        query = query.in_list("gender", &preference.gender);
    }
    if !preference.looking_for.is_empty() {
        query = query.overlaps("looking_for", &preference.looking_for);
    }
    if !preference.interests.is_empty() {
        query = query.overlaps("interests", &preference.interests);
    }
    query
}

fn counted<R, T>(
    rows: Rows<R>,
    page: &PageRequest,
    convert: impl Fn(R) -> StoreResult<T>,
) -> StoreResult<Page<T>> {
    let total = rows.total.unwrap_or(rows.rows.len());
    let items = rows
        .rows
        .into_iter()
        .map(convert)
        .collect::<StoreResult<Vec<T>>>()?;
    Ok(Page::from_counted(items, total, page))
}

// =============================================================================
// Repositories
// =============================================================================

pub struct RestJobRepository<'a> {
    client: &'a RestClient,
}

impl JobRepository for RestJobRepository<'_> {
    async fn list(&self, page: &PageRequest, filter: &JobFilter) -> StoreResult<Page<Job>> {
        let rows = job_query(self.client.from("jobs"), filter)
            .order("posted_date", false)
            .range(page.offset(), page.last_index())
            .exact_count()
            .fetch::<JobRow>()
            .await?;
        counted(rows, page, Job::try_from)
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Job>> {
        self.client
            .from("jobs")
            .eq("id", id)
            .fetch_optional::<JobRow>()
            .await?
            .map(Job::try_from)
            .transpose()
    }

    async fn find_by_source(
        &self,
        source_name: &str,
        source_id: &str,
    ) -> StoreResult<Option<String>> {
        let row = self
            .client
            .from("jobs")
            .select("id")
            .eq("source_name", source_name)
            .eq("source_id", source_id)
            .fetch_optional::<IdRow>()
            .await?;
        Ok(row.map(|r| r.id))
    }

    async fn insert(&self, job: &NewJob) -> StoreResult<Job> {
        let row: JobRow = self
            .client
            .insert("jobs", &[JobInsert::new(job, now())])
            .await?;
        Job::try_from(row)
    }

    async fn record_application(&self, application: &JobApplication) -> StoreResult<()> {
        self.client
            .insert_only(
                "job_applications",
                &[JobApplicationInsert::from(application)],
            )
            .await
    }
}

pub struct RestHousingRepository<'a> {
    client: &'a RestClient,
}

impl HousingRepository for RestHousingRepository<'_> {
    async fn list(
        &self,
        page: &PageRequest,
        filter: &HousingFilter,
    ) -> StoreResult<Page<SeniorLiving>> {
        let rows = housing_query(self.client.from("senior_livings"), filter)
            .order("rating", false)
            .range(page.offset(), page.last_index())
            .exact_count()
            .fetch::<SeniorLivingRow>()
            .await?;
        counted(rows, page, SeniorLiving::try_from)
    }

    async fn get(&self, id: &str) -> StoreResult<Option<SeniorLiving>> {
        self.client
            .from("senior_livings")
            .eq("id", id)
            .fetch_optional::<SeniorLivingRow>()
            .await?
            .map(SeniorLiving::try_from)
            .transpose()
    }

    async fn schedule_tour(&self, request: &TourRequest) -> StoreResult<HousingTour> {
        let row: TourRow = self
            .client
            .insert("housing_tours", &[TourInsert::new(request, now())])
            .await?;
        Ok(row.into())
    }
}

pub struct RestProfileRepository<'a> {
    client: &'a RestClient,
}

impl ProfileRepository for RestProfileRepository<'_> {
    async fn list(
        &self,
        page: &PageRequest,
        preference: &MatchPreference,
    ) -> StoreResult<Page<MatchProfile>> {
        let rows = profile_query(self.client.from("match_profiles"), preference)
            .order("last_active", false)
            .range(page.offset(), page.last_index())
            .exact_count()
            .fetch::<ProfileRow>()
            .await?;
        counted(rows, page, |row| Ok(MatchProfile::from(row)))
    }

    async fn get(&self, id: &str) -> StoreResult<Option<MatchProfile>> {
        let row = self
            .client
            .from("match_profiles")
            .eq("id", id)
            .fetch_optional::<ProfileRow>()
            .await?;
        Ok(row.map(MatchProfile::from))
    }

    async fn upsert(&self, profile: &MatchProfile) -> StoreResult<MatchProfile> {
        let row: ProfileRow = self
            .client
            .upsert("match_profiles", &[ProfileRow::from(profile)])
            .await?;
        Ok(row.into())
    }
}

pub struct RestDonationRepository<'a> {
    client: &'a RestClient,
}

impl RestDonationRepository<'_> {
    async fn amounts(&self, since: Option<DateTime<Utc>>) -> StoreResult<Vec<u64>> {
        let mut query = self.client.from("donations").select("amount");
        if let Some(since) = since {
            query = query.gte("donation_date", since.to_rfc3339());
        }
        let rows = query.fetch::<AmountRow>().await?;
        Ok(rows.rows.iter().map(AmountRow::rupees).collect())
    }
}

impl DonationRepository for RestDonationRepository<'_> {
    async fn insert(&self, donation: &NewDonation) -> StoreResult<Donation> {
        let row: DonationRow = self
            .client
            .insert("donations", &[DonationInsert::from(donation)])
            .await?;
        Ok(row.into())
    }

    async fn recent(&self, limit: usize) -> StoreResult<Vec<Donation>> {
        let rows = self
            .client
            .from("donations")
            .order("donation_date", false)
            .limit(limit)
            .fetch::<DonationRow>()
            .await?;
        Ok(rows.rows.into_iter().map(Donation::from).collect())
    }

    async fn amounts_since(&self, since: DateTime<Utc>) -> StoreResult<Vec<u64>> {
        self.amounts(Some(since)).await
    }

    async fn all_amounts(&self) -> StoreResult<Vec<u64>> {
        self.amounts(None).await
    }
}

pub struct RestStoryRepository<'a> {
    client: &'a RestClient,
}

impl StoryRepository for RestStoryRepository<'_> {
    async fn published(&self) -> StoreResult<Vec<SuccessStory>> {
        let rows = self
            .client
            .from("success_stories")
            .eq("published", true)
            .order("submissionDate", false)
            .fetch::<StoryRow>()
            .await?;
        Ok(rows.rows.into_iter().map(SuccessStory::from).collect())
    }

    async fn insert(&self, story: &NewStory) -> StoreResult<SuccessStory> {
        let row: StoryRow = self
            .client
            .insert("success_stories", &[StoryInsert::new(story, now())])
            .await?;
        Ok(row.into())
    }
}

// =============================================================================
// Store
// =============================================================================

impl Store for RestStore {
    type Jobs<'a> = RestJobRepository<'a>;
    type Housing<'a> = RestHousingRepository<'a>;
    type Profiles<'a> = RestProfileRepository<'a>;
    type Donations<'a> = RestDonationRepository<'a>;
    type Stories<'a> = RestStoryRepository<'a>;

    async fn ping(&self) -> StoreResult<()> {
        self.client.count("jobs").await.map(|_| ())
    }

    async fn count(&self, table: &str) -> StoreResult<u64> {
        self.client.count(table).await
    }

    fn jobs(&self) -> Self::Jobs<'_> {
        RestJobRepository {
            client: &self.client,
        }
    }

    fn housing(&self) -> Self::Housing<'_> {
        RestHousingRepository {
            client: &self.client,
        }
    }

    fn profiles(&self) -> Self::Profiles<'_> {
        RestProfileRepository {
            client: &self.client,
        }
    }

    fn donations(&self) -> Self::Donations<'_> {
        RestDonationRepository {
            client: &self.client,
        }
    }

    fn stories(&self) -> Self::Stories<'_> {
        RestStoryRepository {
            client: &self.client,
        }
    }
}
