//! Domain models for the portal.
//!
//! These records mirror the rows of the hosted store 1:1 and are independent of
//! any backend. Filter types carry their own matching rules so every store
//! applies the same semantics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::{StoreError, StoreResult};
use super::utils::{contains_ci, non_blank};

/// Record identifier as issued by the store.
pub type Id = String;

/// Tables the portal knows about, in the order the admin status view lists them.
pub const KNOWN_TABLES: [&str; 10] = [
    "jobs",
    "senior_livings",
    "match_profiles",
    "job_applications",
    "job_scrapers",
    "events",
    "event_attendees",
    "donations",
    "success_stories",
    "user_settings",
];

// =============================================================================
// Pagination
// =============================================================================

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    page_size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
        }
    }
}

impl PageRequest {
    /// Build a page request, rejecting `page == 0`, `page_size == 0` and pages
    /// whose offset does not fit in `usize`.
    pub fn new(page: usize, page_size: usize) -> StoreResult<Self> {
        if page == 0 {
            return Err(StoreError::Validation {
                message: "page must be at least 1".to_string(),
            });
        }
        if page_size == 0 {
            return Err(StoreError::Validation {
                message: "page_size must be greater than 0".to_string(),
            });
        }
        // offset() and last_index() rely on this staying in range
        if (page - 1)
            .checked_mul(page_size)
            .and_then(|offset| offset.checked_add(page_size))
            .is_none()
        {
            return Err(StoreError::Validation {
                message: format!("page {} is out of range for page_size {}", page, page_size),
            });
        }
        Ok(Self { page, page_size })
    }

    /// Build from optional query values, using 1 and `default_size` when absent.
    pub fn from_parts(
        page: Option<usize>,
        page_size: Option<usize>,
        default_size: usize,
    ) -> StoreResult<Self> {
        Self::new(page.unwrap_or(1), page_size.unwrap_or(default_size))
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn is_first(&self) -> bool {
        self.page == 1
    }

    /// Index of the first record on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.page_size
    }

    /// Inclusive index of the last record on this page.
    pub fn last_index(&self) -> usize {
        self.offset() + self.page_size - 1
    }
}

/// Number of pages needed for `total_items` at `page_size` per page.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size)
}

/// One page of a filtered, sorted result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Wrap a page fetched elsewhere together with the total match count.
    pub fn from_counted(items: Vec<T>, total_items: usize, request: &PageRequest) -> Self {
        Self {
            items,
            page: request.page(),
            page_size: request.page_size(),
            total_items,
            total_pages: total_pages(total_items, request.page_size()),
        }
    }

    /// Cut the requested page out of an already filtered and sorted set.
    pub fn slice(all: Vec<T>, request: &PageRequest) -> Self {
        let total_items = all.len();
        let items = all
            .into_iter()
            .skip(request.offset())
            .take(request.page_size())
            .collect();
        Self::from_counted(items, total_items, request)
    }

    pub fn empty(request: &PageRequest) -> Self {
        Self::from_counted(Vec::new(), 0, request)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// Any requested tag appears (case-insensitively, as a substring) in the record's tags.
fn overlaps_any(requested: &[String], tags: &[String]) -> bool {
    requested
        .iter()
        .any(|want| tags.iter().any(|have| contains_ci(have, want)))
}

// =============================================================================
// Jobs
// =============================================================================

/// Employment type of a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Remote,
    Internship,
}

impl std::fmt::Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobType::FullTime => write!(f, "Full-time"),
            JobType::PartTime => write!(f, "Part-time"),
            JobType::Contract => write!(f, "Contract"),
            JobType::Remote => write!(f, "Remote"),
            JobType::Internship => write!(f, "Internship"),
        }
    }
}

impl std::str::FromStr for JobType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full-time" | "full_time" | "fulltime" => Ok(JobType::FullTime),
            "part-time" | "part_time" | "parttime" => Ok(JobType::PartTime),
            "contract" => Ok(JobType::Contract),
            "remote" => Ok(JobType::Remote),
            "internship" => Ok(JobType::Internship),
            _ => Err(format!("Unknown job type: {}", s)),
        }
    }
}

/// A job posting suitable for differently-abled candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Job {
    pub id: Id,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    /// Display string, e.g. "₹25,000 - ₹35,000/month".
    pub salary: String,
    pub posted_date: DateTime<Utc>,
    pub logo: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub benefits: Vec<String>,
    pub accessibility: Vec<String>,
    pub featured: bool,
    pub application_url: String,
}

/// Job list criteria. All present criteria must hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct JobFilter {
    /// Substring of the location.
    pub location: Option<String>,
    /// Exact employment type.
    #[serde(rename = "type")]
    pub job_type: Option<JobType>,
    /// Substring of title or description.
    pub keyword: Option<String>,
    /// At least one of these accommodations must be offered.
    #[serde(default)]
    pub accessibility: Vec<String>,
}

impl JobFilter {
    pub fn is_empty(&self) -> bool {
        non_blank(&self.location).is_none()
            && self.job_type.is_none()
            && non_blank(&self.keyword).is_none()
            && self.accessibility.is_empty()
    }

    pub fn matches(&self, job: &Job) -> bool {
        if let Some(location) = non_blank(&self.location)
            && !contains_ci(&job.location, location)
        {
            return false;
        }
        if let Some(job_type) = self.job_type
            && job.job_type != job_type
        {
            return false;
        }
        if let Some(keyword) = non_blank(&self.keyword)
            && !contains_ci(&job.title, keyword)
            && !contains_ci(&job.description, keyword)
        {
            return false;
        }
        self.accessibility.is_empty() || overlaps_any(&self.accessibility, &job.accessibility)
    }
}

/// A posting collected by the job scraper, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewJob {
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: JobType,
    pub salary: String,
    pub posted_date: DateTime<Utc>,
    pub logo: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub benefits: Vec<String>,
    pub accessibility: Vec<String>,
    pub featured: bool,
    pub application_url: String,
    pub source_name: String,
    pub source_id: String,
}

impl NewJob {
    /// Materialise the posting under a store-assigned id.
    pub fn into_job(self, id: Id) -> Job {
        Job {
            id,
            title: self.title,
            company: self.company,
            location: self.location,
            job_type: self.job_type,
            salary: self.salary,
            posted_date: self.posted_date,
            logo: self.logo,
            description: self.description,
            requirements: self.requirements,
            benefits: self.benefits,
            accessibility: self.accessibility,
            featured: self.featured,
            application_url: self.application_url,
        }
    }
}

/// A recorded click-through to a job's application page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobApplication {
    pub job_id: Id,
    pub user_id: Option<String>,
    pub applied_at: DateTime<Utc>,
}

// =============================================================================
// Senior housing
// =============================================================================

/// Category of a senior living facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum HousingType {
    #[serde(rename = "Independent Living")]
    IndependentLiving,
    #[serde(rename = "Assisted Living")]
    AssistedLiving,
    #[serde(rename = "Nursing Home")]
    NursingHome,
    #[serde(rename = "Memory Care")]
    MemoryCare,
    #[serde(rename = "Retirement Community")]
    RetirementCommunity,
}

impl std::fmt::Display for HousingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HousingType::IndependentLiving => write!(f, "Independent Living"),
            HousingType::AssistedLiving => write!(f, "Assisted Living"),
            HousingType::NursingHome => write!(f, "Nursing Home"),
            HousingType::MemoryCare => write!(f, "Memory Care"),
            HousingType::RetirementCommunity => write!(f, "Retirement Community"),
        }
    }
}

impl std::str::FromStr for HousingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "independent living" => Ok(HousingType::IndependentLiving),
            "assisted living" => Ok(HousingType::AssistedLiving),
            "nursing home" => Ok(HousingType::NursingHome),
            "memory care" => Ok(HousingType::MemoryCare),
            "retirement community" => Ok(HousingType::RetirementCommunity),
            _ => Err(format!("Unknown housing type: {}", s)),
        }
    }
}

/// Contact channels of a facility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Contact {
    pub phone: String,
    pub email: String,
    pub website: String,
}

/// A senior living facility listed in the housing directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SeniorLiving {
    pub id: Id,
    pub name: String,
    #[serde(rename = "type")]
    pub housing_type: HousingType,
    pub location: String,
    pub address: String,
    /// Display string, e.g. "₹45,000/month".
    pub price: String,
    /// Monthly rate used for price-range filtering.
    pub monthly_rate: Option<u64>,
    pub image: String,
    pub amenities: Vec<String>,
    pub accessibility: Vec<String>,
    pub rating: f32,
    pub review_count: u32,
    pub description: String,
    pub contact: Contact,
    pub openings: bool,
    pub featured: bool,
}

/// Inclusive monthly price bounds; `max == None` means open ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PriceRange {
    pub min: u64,
    pub max: Option<u64>,
}

impl PriceRange {
    pub fn contains(&self, rate: u64) -> bool {
        rate >= self.min && self.max.is_none_or(|max| rate <= max)
    }
}

impl std::str::FromStr for PriceRange {
    type Err = String;

    /// Parses "1000-2000" or "1000".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(2, '-').map(str::trim);
        let min = parts
            .next()
            .and_then(|p| p.parse::<u64>().ok())
            .ok_or_else(|| format!("Invalid price range: {}", s))?;
        let max = match parts.next() {
            Some("") | None => None,
            Some(p) => Some(
                p.parse::<u64>()
                    .map_err(|_| format!("Invalid price range: {}", s))?,
            ),
        };
        Ok(PriceRange { min, max })
    }
}

/// Housing list criteria. All present criteria must hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HousingFilter {
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub housing_type: Option<HousingType>,
    pub price: Option<PriceRange>,
    /// Every listed amenity must be offered.
    #[serde(default)]
    pub amenities: Vec<String>,
    /// At least one listed accommodation must be offered.
    #[serde(default)]
    pub accessibility: Vec<String>,
}

impl HousingFilter {
    pub fn is_empty(&self) -> bool {
        non_blank(&self.location).is_none()
            && self.housing_type.is_none()
            && self.price.is_none()
            && self.amenities.is_empty()
            && self.accessibility.is_empty()
    }

    pub fn matches(&self, home: &SeniorLiving) -> bool {
        if let Some(location) = non_blank(&self.location)
            && !contains_ci(&home.location, location)
        {
            return false;
        }
        if let Some(housing_type) = self.housing_type
            && home.housing_type != housing_type
        {
            return false;
        }
        if let Some(range) = self.price
            && !home.monthly_rate.is_some_and(|rate| range.contains(rate))
        {
            return false;
        }
        let has_all_amenities = self.amenities.iter().all(|want| {
            home.amenities
                .iter()
                .any(|have| have.eq_ignore_ascii_case(want))
        });
        has_all_amenities
            && (self.accessibility.is_empty()
                || overlaps_any(&self.accessibility, &home.accessibility))
    }
}

/// Tour lifecycle; only scheduling is modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum TourStatus {
    #[default]
    Scheduled,
}

/// A visit request for a facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TourRequest {
    pub senior_living_id: Id,
    pub user_id: String,
    /// Calendar date, e.g. "2025-03-14".
    pub tour_date: String,
    /// Time slot, e.g. "10:30".
    pub tour_time: String,
    #[serde(default)]
    pub notes: String,
}

/// A scheduled facility visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HousingTour {
    pub id: Id,
    pub senior_living_id: Id,
    pub user_id: String,
    pub tour_date: String,
    pub tour_time: String,
    pub notes: String,
    pub status: TourStatus,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Matchmaking
// =============================================================================

/// A matrimony/companionship profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MatchProfile {
    pub id: Id,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub location: String,
    pub about: String,
    pub looking_for: Vec<String>,
    pub interests: Vec<String>,
    pub photos: Vec<String>,
    pub last_active: DateTime<Utc>,
    /// Computed per search; never stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compatibility_score: Option<u8>,
}

/// Inclusive age bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AgeRange {
    pub min: u32,
    pub max: u32,
}

impl AgeRange {
    pub fn contains(&self, age: u32) -> bool {
        age >= self.min && age <= self.max
    }
}

/// What a searcher is looking for. Empty lists mean "no preference".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MatchPreference {
    pub age_range: Option<AgeRange>,
    #[serde(default)]
    pub gender: Vec<String>,
    #[serde(default)]
    pub looking_for: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl MatchPreference {
    pub fn is_empty(&self) -> bool {
        self.age_range.is_none()
            && self.gender.is_empty()
            && self.looking_for.is_empty()
            && self.interests.is_empty()
    }

    pub fn matches(&self, profile: &MatchProfile) -> bool {
        if let Some(range) = self.age_range
            && !range.contains(profile.age)
        {
            return false;
        }
        if !self.gender.is_empty() && !self.gender.contains(&profile.gender) {
            return false;
        }
        if !self.looking_for.is_empty()
            && !profile
                .looking_for
                .iter()
                .any(|item| self.looking_for.contains(item))
        {
            return false;
        }
        self.interests.is_empty()
            || profile
                .interests
                .iter()
                .any(|item| self.interests.contains(item))
    }
}

/// Partial profile submitted by its owner. Absent fields take defaults on save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub location: Option<String>,
    pub about: Option<String>,
    pub looking_for: Option<Vec<String>>,
    pub interests: Option<Vec<String>>,
    pub photos: Option<Vec<String>>,
}

// =============================================================================
// Donations
// =============================================================================

/// A stored donation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Donation {
    pub id: Id,
    /// Whole rupees.
    pub amount: u64,
    pub full_name: String,
    pub email: String,
    pub anonymous: bool,
    pub message: Option<String>,
    pub donation_date: DateTime<Utc>,
    pub is_monthly: bool,
}

/// A validated donation ready to insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDonation {
    pub amount: u64,
    pub full_name: String,
    pub email: String,
    pub anonymous: bool,
    pub message: Option<String>,
    pub donation_date: DateTime<Utc>,
    pub is_monthly: bool,
}

impl NewDonation {
    pub fn into_donation(self, id: Id) -> Donation {
        Donation {
            id,
            amount: self.amount,
            full_name: self.full_name,
            email: self.email,
            anonymous: self.anonymous,
            message: self.message,
            donation_date: self.donation_date,
            is_monthly: self.is_monthly,
        }
    }
}

// =============================================================================
// Success stories
// =============================================================================

/// A beneficiary story. Only published stories are shown publicly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SuccessStory {
    pub id: Id,
    pub name: String,
    pub age: u32,
    pub image: String,
    pub story: String,
    pub program: String,
    pub impact: String,
    pub published: bool,
    pub submission_date: DateTime<Utc>,
}

/// A story as submitted; always stored unpublished.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewStory {
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub image: String,
    pub story: String,
    #[serde(default)]
    pub program: String,
    #[serde(default)]
    pub impact: String,
    pub submission_date: Option<DateTime<Utc>>,
}

impl NewStory {
    /// Materialise as an unpublished story awaiting moderation.
    pub fn into_story(self, id: Id, submitted: DateTime<Utc>) -> SuccessStory {
        SuccessStory {
            id,
            name: self.name,
            age: self.age,
            image: self.image,
            story: self.story,
            program: self.program,
            impact: self.impact,
            published: false,
            submission_date: self.submission_date.unwrap_or(submitted),
        }
    }
}

// =============================================================================
// Admin
// =============================================================================

/// Existence and size of one store table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TableStatus {
    pub name: String,
    pub exists: bool,
    pub record_count: Option<u64>,
}
