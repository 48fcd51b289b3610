//! Donations: submission, recent donor feeds and fundraising totals.
//!
//! Read paths never fail the caller; on a store error they log and return
//! empty or default values.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use utoipa::ToSchema;

use super::error::{SubmissionError, require};
use crate::store::utils::now;
use crate::store::{Donation, DonationRepository, NewDonation, Store};

/// Monthly fundraising target, in rupees.
pub const MONTHLY_TARGET: u64 = 100_000;

/// Amount selector value meaning "use the custom amount field".
pub const CUSTOM_AMOUNT: &str = "custom";

const JOB_COST: u64 = 10_000;
const HOUSING_COST: u64 = 20_000;
const EVENT_COST: u64 = 5_000;

const MIN_JOBS_SECURED: u64 = 5;
const MIN_HOUSING_PLACEMENTS: u64 = 3;
const MIN_EVENTS_ORGANIZED: u64 = 12;

/// Donation form as submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DonationForm {
    /// Preset amount, or `"custom"` to use `custom_amount`.
    #[schema(example = "1000")]
    pub amount: String,
    pub custom_amount: Option<String>,
    pub donor_name: String,
    pub donor_email: String,
    #[serde(default)]
    pub is_monthly: bool,
    #[serde(default)]
    pub anonymous: bool,
    pub message: Option<String>,
}

/// Successful submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DonationReceipt {
    pub id: String,
    pub amount: u64,
    pub message: String,
}

/// Entry of the compact "recent donations" feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecentDonation {
    pub name: String,
    #[schema(example = "₹500")]
    pub amount: String,
    #[schema(example = "3 hours ago")]
    pub time: String,
}

/// Entry of the donor wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecentDonor {
    pub name: String,
    pub amount: String,
    pub timestamp: DateTime<Utc>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MonthlyDonations {
    pub total: u64,
    pub target: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImpactStats {
    pub jobs_secured: u64,
    pub housing_placements: u64,
    pub events_organized: u64,
    pub total_raised: u64,
    pub goal_amount: u64,
}

impl ImpactStats {
    /// Impact implied by `total_raised` rupees.
    pub fn from_total(total_raised: u64) -> Self {
        Self {
            jobs_secured: (total_raised / JOB_COST).max(MIN_JOBS_SECURED),
            housing_placements: (total_raised / HOUSING_COST).max(MIN_HOUSING_PLACEMENTS),
            events_organized: (total_raised / EVENT_COST).max(MIN_EVENTS_ORGANIZED),
            total_raised,
            goal_amount: MONTHLY_TARGET,
        }
    }
}

/// Parse a whole rupee amount the way a lenient form field would: leading
/// digits count, anything after them is ignored.
fn parse_leading_amount(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = trimmed.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Resolve the amount selected on the form; zero and garbage are rejected.
pub fn resolve_amount(form: &DonationForm) -> Result<u64, SubmissionError> {
    let raw = match form.custom_amount.as_deref() {
        Some(custom) if form.amount == CUSTOM_AMOUNT => custom,
        _ => form.amount.as_str(),
    };
    match parse_leading_amount(raw) {
        Some(amount) if amount > 0 => Ok(amount),
        _ => Err(SubmissionError::InvalidAmount),
    }
}

/// Validate and store a donation.
pub async fn submit_donation<S: Store>(
    store: &S,
    form: &DonationForm,
) -> Result<DonationReceipt, SubmissionError> {
    let amount = resolve_amount(form)?;
    require("donor_name", &form.donor_name)?;
    require("donor_email", &form.donor_email)?;

    let donation = NewDonation {
        amount,
        full_name: form.donor_name.trim().to_string(),
        email: form.donor_email.trim().to_string(),
        anonymous: form.anonymous,
        message: form
            .message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string),
        donation_date: now(),
        is_monthly: form.is_monthly,
    };

    let stored = store
        .donations()
        .insert(&donation)
        .await
        .map_err(|e| {
            error!(error = %e, "Error submitting donation");
            SubmissionError::remote(
                "There was an error processing your donation. Please try again.",
                e,
            )
        })?;

    info!(donation_id = %stored.id, amount, "Donation received");
    Ok(DonationReceipt {
        id: stored.id,
        amount,
        message: "Thank you for your donation! Your generosity makes a difference.".to_string(),
    })
}

fn display_name(donation: &Donation) -> String {
    if donation.anonymous {
        "Anonymous".to_string()
    } else {
        donation.full_name.clone()
    }
}

pub fn format_rupees(amount: u64) -> String {
    format!("₹{}", amount)
}

/// Coarse relative time of `then` as seen at `at`.
pub fn time_ago(then: DateTime<Utc>, at: DateTime<Utc>) -> String {
    let hours = (at - then).num_hours();
    if hours < 1 {
        return "Just now".to_string();
    }
    if hours == 1 {
        return "1 hour ago".to_string();
    }
    if hours < 24 {
        return format!("{} hours ago", hours);
    }
    match hours / 24 {
        1 => "1 day ago".to_string(),
        days => format!("{} days ago", days),
    }
}

/// Midnight UTC on the first day of `at`'s month.
pub fn start_of_month(at: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(at.year(), at.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(at)
}

/// Latest donations for the home page feed.
pub async fn recent_donations<S: Store>(store: &S, limit: usize) -> Vec<RecentDonation> {
    let at = now();
    match store.donations().recent(limit).await {
        Ok(donations) => donations
            .iter()
            .map(|d| RecentDonation {
                name: display_name(d),
                amount: format_rupees(d.amount),
                time: time_ago(d.donation_date, at),
            })
            .collect(),
        Err(e) => {
            error!(error = %e, "Error fetching recent donations");
            Vec::new()
        }
    }
}

/// Latest donors with their messages, for the donate page.
pub async fn recent_donors<S: Store>(store: &S, limit: usize) -> Vec<RecentDonor> {
    match store.donations().recent(limit).await {
        Ok(donations) => donations
            .into_iter()
            .map(|d| RecentDonor {
                name: display_name(&d),
                amount: format_rupees(d.amount),
                timestamp: d.donation_date,
                message: d.message,
            })
            .collect(),
        Err(e) => {
            error!(error = %e, "Error fetching recent donors");
            Vec::new()
        }
    }
}

/// Money raised since the start of the current month.
pub async fn monthly_donations<S: Store>(store: &S) -> MonthlyDonations {
    let total = match store.donations().amounts_since(start_of_month(now())).await {
        Ok(amounts) => amounts.iter().sum(),
        Err(e) => {
            error!(error = %e, "Error calculating monthly donations");
            0
        }
    };
    MonthlyDonations {
        total,
        target: MONTHLY_TARGET,
    }
}

/// Impact figures derived from everything raised so far.
pub async fn impact_stats<S: Store>(store: &S) -> ImpactStats {
    match store.donations().all_amounts().await {
        Ok(amounts) => ImpactStats::from_total(amounts.iter().sum()),
        Err(e) => {
            error!(error = %e, "Error calculating impact stats");
            ImpactStats::from_total(0)
        }
    }
}
