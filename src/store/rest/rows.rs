//! Row shapes of the hosted tables and their mapping to the domain models.
//!
//! Columns are snake_case and array columns may be `null`; both are absorbed
//! here so the models stay clean.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::serde_utils::{null_as_default, string_or_number};
use crate::store::{
    Contact, Donation, HousingTour, Job, JobApplication, MatchProfile, NewDonation, NewJob,
    NewStory, SeniorLiving, StoreError, SuccessStory, TourRequest, TourStatus,
};

const DEFAULT_JOB_LOGO: &str =
    "https://images.unsplash.com/photo-1560472355-536de3962603?w=64&h=64&auto=format&fit=crop";

fn decode_error(table: &str, message: String) -> StoreError {
    StoreError::Decode {
        message: format!("{}: {}", table, message),
    }
}

// =============================================================================
// jobs
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct JobRow {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub salary: String,
    pub posted_date: DateTime<Utc>,
    pub logo: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub requirements: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub benefits: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub accessibility: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub featured: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub application_url: String,
}

impl TryFrom<JobRow> for Job {
    type Error = StoreError;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        let job_type = row
            .job_type
            .parse()
            .map_err(|e| decode_error("jobs", e))?;
        Ok(Job {
            id: row.id,
            title: row.title,
            company: row.company,
            location: row.location,
            job_type,
            salary: row.salary,
            posted_date: row.posted_date,
            logo: row.logo.unwrap_or_else(|| DEFAULT_JOB_LOGO.to_string()),
            description: row.description,
            requirements: row.requirements,
            benefits: row.benefits,
            accessibility: row.accessibility,
            featured: row.featured,
            application_url: row.application_url,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct JobInsert<'a> {
    pub title: &'a str,
    pub company: &'a str,
    pub location: &'a str,
    #[serde(rename = "type")]
    pub job_type: String,
    pub salary: &'a str,
    pub posted_date: DateTime<Utc>,
    pub logo: &'a str,
    pub description: &'a str,
    pub requirements: &'a [String],
    pub benefits: &'a [String],
    pub accessibility: &'a [String],
    pub featured: bool,
    pub application_url: &'a str,
    pub source_name: &'a str,
    pub source_id: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> JobInsert<'a> {
    pub fn new(job: &'a NewJob, created_at: DateTime<Utc>) -> Self {
        Self {
            title: &job.title,
            company: &job.company,
            location: &job.location,
            job_type: job.job_type.to_string(),
            salary: &job.salary,
            posted_date: job.posted_date,
            logo: &job.logo,
            description: &job.description,
            requirements: &job.requirements,
            benefits: &job.benefits,
            accessibility: &job.accessibility,
            featured: job.featured,
            application_url: &job.application_url,
            source_name: &job.source_name,
            source_id: &job.source_id,
            created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct IdRow {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct JobApplicationInsert<'a> {
    pub job_id: &'a str,
    pub user_id: Option<&'a str>,
    pub applied_at: DateTime<Utc>,
}

impl<'a> From<&'a JobApplication> for JobApplicationInsert<'a> {
    fn from(a: &'a JobApplication) -> Self {
        Self {
            job_id: &a.job_id,
            user_id: a.user_id.as_deref(),
            applied_at: a.applied_at,
        }
    }
}

// =============================================================================
// senior_livings / housing_tours
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct SeniorLivingRow {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub housing_type: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: String,
    pub price_numeric: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amenities: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub accessibility: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub review_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contact: Contact,
    #[serde(default, deserialize_with = "null_as_default")]
    pub openings: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub featured: bool,
}

impl TryFrom<SeniorLivingRow> for SeniorLiving {
    type Error = StoreError;

    fn try_from(row: SeniorLivingRow) -> Result<Self, Self::Error> {
        let housing_type = row
            .housing_type
            .parse()
            .map_err(|e| decode_error("senior_livings", e))?;
        Ok(SeniorLiving {
            id: row.id,
            name: row.name,
            housing_type,
            location: row.location,
            address: row.address,
            price: row.price,
            monthly_rate: row
                .price_numeric
                .filter(|p| p.is_finite() && *p >= 0.0)
                .map(|p| p.round() as u64),
            image: row.image,
            amenities: row.amenities,
            accessibility: row.accessibility,
            rating: row.rating,
            review_count: row.review_count,
            description: row.description,
            contact: row.contact,
            openings: row.openings,
            featured: row.featured,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct TourInsert<'a> {
    pub senior_living_id: &'a str,
    pub user_id: &'a str,
    pub tour_date: &'a str,
    pub tour_time: &'a str,
    pub notes: &'a str,
    pub status: TourStatus,
    pub created_at: DateTime<Utc>,
}

impl<'a> TourInsert<'a> {
    pub fn new(request: &'a TourRequest, created_at: DateTime<Utc>) -> Self {
        Self {
            senior_living_id: &request.senior_living_id,
            user_id: &request.user_id,
            tour_date: &request.tour_date,
            tour_time: &request.tour_time,
            notes: &request.notes,
            status: TourStatus::Scheduled,
            created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TourRow {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub senior_living_id: String,
    pub user_id: String,
    pub tour_date: String,
    pub tour_time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
    pub status: TourStatus,
    pub created_at: DateTime<Utc>,
}

impl From<TourRow> for HousingTour {
    fn from(row: TourRow) -> Self {
        HousingTour {
            id: row.id,
            senior_living_id: row.senior_living_id,
            user_id: row.user_id,
            tour_date: row.tour_date,
            tour_time: row.tour_time,
            notes: row.notes,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

// =============================================================================
// match_profiles
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileRow {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub about: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub looking_for: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub interests: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub photos: Vec<String>,
    pub last_active: DateTime<Utc>,
}

impl From<ProfileRow> for MatchProfile {
    fn from(row: ProfileRow) -> Self {
        MatchProfile {
            id: row.id,
            name: row.name,
            age: row.age,
            gender: row.gender,
            location: row.location,
            about: row.about,
            looking_for: row.looking_for,
            interests: row.interests,
            photos: row.photos,
            last_active: row.last_active,
            compatibility_score: None,
        }
    }
}

impl From<&MatchProfile> for ProfileRow {
    fn from(p: &MatchProfile) -> Self {
        ProfileRow {
            id: p.id.clone(),
            name: p.name.clone(),
            age: p.age,
            gender: p.gender.clone(),
            location: p.location.clone(),
            about: p.about.clone(),
            looking_for: p.looking_for.clone(),
            interests: p.interests.clone(),
            photos: p.photos.clone(),
            last_active: p.last_active,
        }
    }
}

// =============================================================================
// donations
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct DonationRow {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub anonymous: bool,
    pub message: Option<String>,
    pub donation_date: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_monthly: bool,
}

impl From<DonationRow> for Donation {
    fn from(row: DonationRow) -> Self {
        Donation {
            id: row.id,
            amount: whole_rupees(row.amount),
            full_name: row.full_name,
            email: row.email,
            anonymous: row.anonymous,
            message: row.message,
            donation_date: row.donation_date,
            is_monthly: row.is_monthly,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DonationInsert<'a> {
    pub amount: u64,
    pub full_name: &'a str,
    pub email: &'a str,
    pub anonymous: bool,
    pub message: Option<&'a str>,
    pub donation_date: DateTime<Utc>,
    pub is_monthly: bool,
}

impl<'a> From<&'a NewDonation> for DonationInsert<'a> {
    fn from(d: &'a NewDonation) -> Self {
        Self {
            amount: d.amount,
            full_name: &d.full_name,
            email: &d.email,
            anonymous: d.anonymous,
            message: d.message.as_deref(),
            donation_date: d.donation_date,
            is_monthly: d.is_monthly,
        }
    }
}

/// Amounts are stored as `numeric`; anything negative or non-finite reads as zero.
pub fn whole_rupees(amount: f64) -> u64 {
    if amount.is_finite() && amount > 0.0 {
        amount.round() as u64
    } else {
        0
    }
}

#[derive(Debug, Deserialize)]
pub struct AmountRow {
    pub amount: f64,
}

impl AmountRow {
    pub fn rupees(&self) -> u64 {
        whole_rupees(self.amount)
    }
}

// =============================================================================
// success_stories
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct StoryRow {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub age: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    pub story: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub program: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub impact: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub published: bool,
    #[serde(rename = "submissionDate")]
    pub submission_date: DateTime<Utc>,
}

impl From<StoryRow> for SuccessStory {
    fn from(row: StoryRow) -> Self {
        SuccessStory {
            id: row.id,
            name: row.name,
            age: row.age,
            image: row.image,
            story: row.story,
            program: row.program,
            impact: row.impact,
            published: row.published,
            submission_date: row.submission_date,
        }
    }
}

/// Insert shape for a submitted story. `published` is always false.
#[derive(Debug, Serialize)]
pub struct StoryInsert<'a> {
    pub name: &'a str,
    pub age: u32,
    pub image: &'a str,
    pub story: &'a str,
    pub program: &'a str,
    pub impact: &'a str,
    pub published: bool,
    #[serde(rename = "submissionDate")]
    pub submission_date: DateTime<Utc>,
}

impl<'a> StoryInsert<'a> {
    pub fn new(story: &'a NewStory, submitted: DateTime<Utc>) -> Self {
        Self {
            name: &story.name,
            age: story.age,
            image: &story.image,
            story: &story.story,
            program: &story.program,
            impact: &story.impact,
            published: false,
            submission_date: story.submission_date.unwrap_or(submitted),
        }
    }
}
