//! Domain services.
//!
//! Thin functions over a [`Store`](crate::store::Store): they validate input,
//! call the repositories and shape results for callers. Read paths of the
//! donation and story feeds degrade to empty values; listing paths propagate
//! errors so callers can show a retryable state.

pub mod admin;
pub mod donations;
mod error;
pub mod housing;
pub mod jobs;
pub mod matchmaking;
pub mod scraper;
pub mod stories;

#[cfg(test)]
mod jobs_test;
#[cfg(test)]
mod submissions_test;

pub use error::SubmissionError;
