//! Success stories.

use tracing::{error, info};

use super::error::{SubmissionError, require};
use crate::store::{NewStory, Store, StoryRepository, SuccessStory};

/// Published stories, newest first. Empty when the store is unavailable.
pub async fn get_success_stories<S: Store>(store: &S) -> Vec<SuccessStory> {
    store.stories().published().await.unwrap_or_else(|e| {
        error!(error = %e, "Error fetching success stories");
        Vec::new()
    })
}

/// Submit a story for moderation. It stays hidden until published.
pub async fn submit_success_story<S: Store>(
    store: &S,
    story: &NewStory,
) -> Result<SuccessStory, SubmissionError> {
    require("name", &story.name)?;
    require("story", &story.story)?;

    let stored = store.stories().insert(story).await.map_err(|e| {
        error!(error = %e, "Error submitting success story");
        SubmissionError::remote(
            "There was an error submitting your story. Please try again.",
            e,
        )
    })?;
    info!(story_id = %stored.id, "Story submitted for review");
    Ok(stored)
}
