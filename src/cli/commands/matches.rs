use serde_json::json;
use tabled::{Table, Tabled};

use crate::cli::api_client::ApiClient;
use crate::cli::commands::{PageParams, page_footer};
use crate::cli::error::{CliError, CliResult};
use crate::cli::utils::{apply_table_style, format_list, parse_list, truncate_with_ellipsis};
use crate::store::{AgeRange, MatchPreference, MatchProfile, Page};

/// Match criteria as given on the command line
#[derive(Debug, Default)]
pub struct MatchArgs<'a> {
    pub min_age: Option<u32>,
    pub max_age: Option<u32>,
    pub gender: Option<&'a str>,
    pub looking_for: Option<&'a str>,
    pub interests: Option<&'a str>,
}

impl MatchArgs<'_> {
    /// Both age bounds or neither; a lone bound is open on the other side.
    pub fn preference(&self) -> CliResult<MatchPreference> {
        let age_range = match (self.min_age, self.max_age) {
            (None, None) => None,
            (min, max) => {
                let range = AgeRange {
                    min: min.unwrap_or(18),
                    max: max.unwrap_or(120),
                };
                if range.min > range.max {
                    return Err(CliError::InvalidArgument {
                        message: format!(
                            "--min-age {} is greater than --max-age {}",
                            range.min, range.max
                        ),
                    });
                }
                Some(range)
            }
        };
        Ok(MatchPreference {
            age_range,
            gender: parse_list(self.gender),
            looking_for: parse_list(self.looking_for),
            interests: parse_list(self.interests),
        })
    }
}

#[derive(Tabled)]
struct MatchDisplay {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Age")]
    age: u32,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Interests")]
    interests: String,
    #[tabled(rename = "Score")]
    score: String,
}

impl From<&MatchProfile> for MatchDisplay {
    fn from(profile: &MatchProfile) -> Self {
        Self {
            id: truncate_with_ellipsis(&profile.id, 12),
            name: truncate_with_ellipsis(&profile.name, 30),
            age: profile.age,
            location: truncate_with_ellipsis(&profile.location, 30),
            interests: truncate_with_ellipsis(&format_list(&profile.interests), 40),
            score: profile
                .compatibility_score
                .map(|s| format!("{}%", s))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Search profiles and show compatibility scores
pub async fn find_matches(
    api_client: &ApiClient,
    args: &MatchArgs<'_>,
    page: PageParams,
    format: &str,
) -> CliResult<String> {
    let mut body = serde_json::to_value(args.preference()?)?;
    if let Some(map) = body.as_object_mut() {
        map.insert("page".to_string(), json!(page.page));
        map.insert("page_size".to_string(), json!(page.page_size));
    }

    let response = api_client
        .post("/api/v1/matches/search")
        .json(&body)
        .send()
        .await?;
    let page: Page<MatchProfile> = ApiClient::handle_response(response).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&page.items)?),
        _ => Ok(format_table(&page)),
    }
}

fn format_table(page: &Page<MatchProfile>) -> String {
    if page.items.is_empty() {
        return "No matches found.".to_string();
    }

    let display: Vec<MatchDisplay> = page.items.iter().map(MatchDisplay::from).collect();
    let mut table = Table::new(display);
    apply_table_style(&mut table);
    format!(
        "{}\n{}",
        table,
        page_footer(page.page, page.total_pages, page.total_items, "profiles")
    )
}
