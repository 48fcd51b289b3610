use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled};

use crate::cli::api_client::ApiClient;
use crate::cli::error::CliResult;
use crate::cli::utils::apply_table_style;
use crate::services::scraper::{ScrapeReport, ScraperStatus};
use crate::store::TableStatus;

#[derive(Debug, Serialize, Deserialize)]
struct HealthResponse {
    status: String,
    credentials: String,
}

#[derive(Tabled)]
struct TableDisplay {
    #[tabled(rename = "Table")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Records")]
    records: String,
}

impl From<&TableStatus> for TableDisplay {
    fn from(table: &TableStatus) -> Self {
        Self {
            name: table.name.clone(),
            status: if table.exists { "✓" } else { "✗ missing" }.to_string(),
            records: table
                .record_count
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Server liveness and credential status
pub async fn health(api_client: &ApiClient) -> CliResult<String> {
    let health: HealthResponse =
        ApiClient::handle_response(api_client.get("/health").send().await?).await?;
    Ok(format!(
        "Server at {} is {} (store credentials {})",
        api_client.base_url(),
        health.status,
        health.credentials
    ))
}

/// Existence and row count of every table
pub async fn table_statuses(api_client: &ApiClient, format: &str) -> CliResult<String> {
    let tables: Vec<TableStatus> =
        ApiClient::handle_response(api_client.get("/api/v1/admin/tables").send().await?).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&tables)?),
        _ => {
            let display: Vec<TableDisplay> = tables.iter().map(TableDisplay::from).collect();
            let mut table = Table::new(display);
            apply_table_style(&mut table);
            Ok(table.to_string())
        }
    }
}

/// Run the job scraper once
pub async fn trigger_scrape(api_client: &ApiClient) -> CliResult<String> {
    let report: ScrapeReport =
        ApiClient::handle_response(api_client.post("/api/v1/admin/scrape").send().await?).await?;

    let marker = if report.success { "✓" } else { "✗" };
    Ok(format!(
        "{} {} ({} new, {} already listed)",
        marker, report.message, report.inserted, report.skipped
    ))
}

/// Configured sites and the last run
pub async fn scraper_status(api_client: &ApiClient, format: &str) -> CliResult<String> {
    let status: ScraperStatus =
        ApiClient::handle_response(api_client.get("/api/v1/admin/scraper").send().await?).await?;

    if format == "json" {
        return Ok(serde_json::to_string_pretty(&status)?);
    }

    let mut lines: Vec<String> = status
        .sites
        .iter()
        .map(|site| format!("{} <{}>", site.name, site.url))
        .collect();
    lines.push(match &status.last_run {
        Some(run) => format!(
            "Last run {}: {}",
            run.finished_at.format("%Y-%m-%d %H:%M"),
            run.message
        ),
        None => "Never run".to_string(),
    });
    Ok(lines.join("\n"))
}
