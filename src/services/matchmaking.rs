//! Matchmaking: profile search and compatibility scoring.

use chrono::{DateTime, Utc};
use tracing::error;

use crate::store::utils::now;
use crate::store::{
    MatchPreference, MatchProfile, Page, PageRequest, ProfileRepository, ProfileUpdate, Store,
    StoreResult,
};

const FACTOR_WEIGHT: f64 = 25.0;

/// Score returned when the preference specifies nothing.
pub const NEUTRAL_SCORE: u8 = 50;

/// Fraction of `wanted` found in `offered`.
fn overlap_ratio(wanted: &[String], offered: &[String]) -> f64 {
    let hits = wanted.iter().filter(|w| offered.contains(w)).count();
    hits as f64 / wanted.len() as f64
}

/// 0-100 score of how well `profile` fits `preference`.
///
/// Age range and gender count fully or not at all; looking-for and interests
/// count in proportion to the share of requested items the profile lists.
/// Criteria the preference leaves out are not weighed.
pub fn compatibility_score(profile: &MatchProfile, preference: &MatchPreference) -> u8 {
    let mut score = 0.0;
    let mut total = 0.0;

    if let Some(range) = preference.age_range {
        if range.contains(profile.age) {
            score += FACTOR_WEIGHT;
        }
        total += FACTOR_WEIGHT;
    }
    if !preference.gender.is_empty() {
        if preference.gender.contains(&profile.gender) {
            score += FACTOR_WEIGHT;
        }
        total += FACTOR_WEIGHT;
    }
    if !preference.looking_for.is_empty() {
        score += FACTOR_WEIGHT * overlap_ratio(&preference.looking_for, &profile.looking_for);
        total += FACTOR_WEIGHT;
    }
    if !preference.interests.is_empty() {
        score += FACTOR_WEIGHT * overlap_ratio(&preference.interests, &profile.interests);
        total += FACTOR_WEIGHT;
    }

    if total == 0.0 {
        return NEUTRAL_SCORE;
    }
    (score / total * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Profiles matching `preference`, most recently active first, each scored.
pub async fn find_matches<S: Store>(
    store: &S,
    preference: &MatchPreference,
    page: &PageRequest,
) -> StoreResult<Page<MatchProfile>> {
    let found = store
        .profiles()
        .list(page, preference)
        .await
        .inspect_err(|e| error!(error = %e, "Error finding matches"))?;
    Ok(found.map(|mut profile| {
        profile.compatibility_score = Some(compatibility_score(&profile, preference));
        profile
    }))
}

pub async fn get_user_profile<S: Store>(
    store: &S,
    user_id: &str,
) -> StoreResult<Option<MatchProfile>> {
    store
        .profiles()
        .get(user_id)
        .await
        .inspect_err(|e| error!(user_id, error = %e, "Error getting user profile"))
}

/// Complete a partial profile, filling absent fields with defaults.
pub fn build_profile(update: ProfileUpdate, user_id: &str, at: DateTime<Utc>) -> MatchProfile {
    MatchProfile {
        id: user_id.to_string(),
        name: update.name.unwrap_or_else(|| "User".to_string()),
        age: update.age.unwrap_or(30),
        gender: update.gender.unwrap_or_else(|| "other".to_string()),
        location: update.location.unwrap_or_else(|| "India".to_string()),
        about: update.about.unwrap_or_default(),
        looking_for: update
            .looking_for
            .unwrap_or_else(|| vec!["marriage".to_string()]),
        interests: update.interests.unwrap_or_default(),
        photos: update.photos.unwrap_or_default(),
        last_active: at,
        compatibility_score: None,
    }
}

/// Create or replace the profile owned by `user_id`.
pub async fn save_user_profile<S: Store>(
    store: &S,
    update: ProfileUpdate,
    user_id: &str,
) -> StoreResult<MatchProfile> {
    let profile = build_profile(update, user_id, now());
    store
        .profiles()
        .upsert(&profile)
        .await
        .inspect_err(|e| error!(user_id, error = %e, "Error saving user profile"))
}
