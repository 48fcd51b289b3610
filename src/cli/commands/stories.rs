use tabled::{Table, Tabled};

use crate::cli::api_client::ApiClient;
use crate::cli::error::CliResult;
use crate::cli::utils::{apply_table_style, format_date, truncate_with_ellipsis};
use crate::store::{NewStory, SuccessStory};

#[derive(Tabled)]
struct StoryDisplay {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Age")]
    age: u32,
    #[tabled(rename = "Program")]
    program: String,
    #[tabled(rename = "Story")]
    story: String,
    #[tabled(rename = "Submitted")]
    submitted: String,
}

impl From<&SuccessStory> for StoryDisplay {
    fn from(story: &SuccessStory) -> Self {
        Self {
            name: truncate_with_ellipsis(&story.name, 30),
            age: story.age,
            program: truncate_with_ellipsis(&story.program, 20),
            story: truncate_with_ellipsis(&story.story, 60),
            submitted: format_date(&story.submission_date),
        }
    }
}

/// Published success stories
pub async fn list_stories(api_client: &ApiClient, format: &str) -> CliResult<String> {
    let stories: Vec<SuccessStory> =
        ApiClient::handle_response(api_client.get("/api/v1/stories").send().await?).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&stories)?),
        _ => Ok(format_table(&stories)),
    }
}

fn format_table(stories: &[SuccessStory]) -> String {
    if stories.is_empty() {
        return "No published stories yet.".to_string();
    }

    let display: Vec<StoryDisplay> = stories.iter().map(StoryDisplay::from).collect();
    let mut table = Table::new(display);
    apply_table_style(&mut table);
    table.to_string()
}

/// Submit a story for moderation
pub async fn submit_story(api_client: &ApiClient, story: &NewStory) -> CliResult<String> {
    let response = api_client
        .post("/api/v1/stories")
        .json(story)
        .send()
        .await?;

    let stored: SuccessStory = ApiClient::handle_response(response).await?;
    Ok(format!(
        "✓ Story submitted for review: {} ({})",
        stored.name, stored.id
    ))
}
