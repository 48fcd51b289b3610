//! Store utility functions.

use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{DateTime, Utc};

static SEQUENCE: AtomicU32 = AtomicU32::new(0);

/// Generate an 8-character hex ID for locally created records.
///
/// Mixes the clock with a process-wide counter so ids created within the same
/// instant stay distinct.
pub fn generate_entity_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let timestamp = (duration.as_secs() as u32) ^ duration.subsec_nanos() ^ seq.rotate_left(16);
    format!("{:08x}", timestamp)
}

/// Current instant, in UTC.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Lowercased substring test used by every text filter.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Treat whitespace-only filter values as absent.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
