use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled};

use crate::cli::api_client::ApiClient;
use crate::cli::commands::{PageParams, page_footer, with_param};
use crate::cli::error::CliResult;
use crate::cli::utils::{apply_table_style, format_date, format_list, truncate_with_ellipsis};
use crate::store::{Job, Page};

/// Job list filters as given on the command line
#[derive(Debug, Default)]
pub struct JobQuery<'a> {
    pub location: Option<&'a str>,
    pub job_type: Option<&'a str>,
    pub keyword: Option<&'a str>,
    /// Comma-separated accommodations
    pub accessibility: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct ApplyRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ApplyResponse {
    application_url: String,
    tracked: bool,
}

#[derive(Tabled)]
struct JobDisplay {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Company")]
    company: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Type")]
    job_type: String,
    #[tabled(rename = "Posted")]
    posted: String,
}

impl From<&Job> for JobDisplay {
    fn from(job: &Job) -> Self {
        Self {
            id: truncate_with_ellipsis(&job.id, 12),
            title: truncate_with_ellipsis(&job.title, 40),
            company: truncate_with_ellipsis(&job.company, 30),
            location: truncate_with_ellipsis(&job.location, 30),
            job_type: job.job_type.to_string(),
            posted: format_date(&job.posted_date),
        }
    }
}

/// List jobs with optional filtering
pub async fn list_jobs(
    api_client: &ApiClient,
    query: &JobQuery<'_>,
    page: PageParams,
    format: &str,
) -> CliResult<String> {
    let mut request = api_client.get("/api/v1/jobs");
    request = with_param(request, "location", query.location);
    request = with_param(request, "type", query.job_type);
    request = with_param(request, "keyword", query.keyword);
    request = with_param(request, "accessibility", query.accessibility);
    request = page.apply(request);

    let response: Page<Job> = ApiClient::handle_response(request.send().await?).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&response.items)?),
        _ => Ok(format_table(&response)),
    }
}

fn format_table(page: &Page<Job>) -> String {
    if page.items.is_empty() {
        return "No jobs found.".to_string();
    }

    let display: Vec<JobDisplay> = page.items.iter().map(JobDisplay::from).collect();
    let mut table = Table::new(display);
    apply_table_style(&mut table);
    format!(
        "{}\n{}",
        table,
        page_footer(page.page, page.total_pages, page.total_items, "jobs")
    )
}

/// Get a single job by ID
pub async fn get_job(api_client: &ApiClient, id: &str, format: &str) -> CliResult<String> {
    let response = api_client.get(&format!("/api/v1/jobs/{}", id)).send().await?;
    let job: Job = ApiClient::handle_response(response).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&job)?),
        _ => Ok(format_job_detail(&job)),
    }
}

fn format_job_detail(job: &Job) -> String {
    use tabled::builder::Builder;

    let mut builder = Builder::default();

    builder.push_record(["Job ID", &job.id]);
    builder.push_record(["Title", &job.title]);
    builder.push_record(["Company", &job.company]);
    builder.push_record(["Location", &job.location]);
    builder.push_record(["Type", &job.job_type.to_string()]);
    builder.push_record(["Salary", &job.salary]);
    builder.push_record(["Posted", &format_date(&job.posted_date)]);
    builder.push_record(["Description", &job.description]);
    builder.push_record(["Requirements", &format_list(&job.requirements)]);
    builder.push_record(["Benefits", &format_list(&job.benefits)]);
    builder.push_record(["Accessibility", &format_list(&job.accessibility)]);
    builder.push_record(["Apply at", &job.application_url]);

    let mut table = builder.build();
    apply_table_style(&mut table);
    table.to_string()
}

/// Record an application and print where to apply
pub async fn apply_for_job(
    api_client: &ApiClient,
    id: &str,
    user_id: Option<&str>,
) -> CliResult<String> {
    let response = api_client
        .post(&format!("/api/v1/jobs/{}/apply", id))
        .json(&ApplyRequest { user_id })
        .send()
        .await?;

    let applied: ApplyResponse = ApiClient::handle_response(response).await?;
    if applied.tracked {
        Ok(format!("✓ Application recorded. Apply at: {}", applied.application_url))
    } else {
        Ok(format!(
            "Apply at: {} (application could not be recorded)",
            applied.application_url
        ))
    }
}
