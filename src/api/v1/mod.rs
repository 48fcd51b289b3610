//! V1 API handlers.

mod admin;
mod auth;
mod context;
mod donations;
mod housing;
mod jobs;
mod matches;
mod stories;

#[cfg(test)]
mod housing_test;
#[cfg(test)]
mod jobs_test;
#[cfg(test)]
mod matches_test;

pub use admin::*;
pub use auth::*;
pub use context::*;
pub use donations::*;
pub use housing::*;
pub use jobs::*;
pub use matches::*;
pub use stories::*;

/// Page size when the query leaves it out.
pub(crate) const DEFAULT_PAGE_SIZE: usize = 10;

/// Split a comma-separated query value, dropping blanks.
pub(crate) fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
