use tabled::{Table, Tabled};

use crate::cli::api_client::ApiClient;
use crate::cli::error::CliResult;
use crate::cli::utils::{apply_table_style, truncate_with_ellipsis};
use crate::services::donations::{
    DonationForm, DonationReceipt, ImpactStats, MonthlyDonations, RecentDonation,
};

#[derive(Tabled)]
struct DonationDisplay {
    #[tabled(rename = "Donor")]
    name: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "When")]
    time: String,
}

impl From<&RecentDonation> for DonationDisplay {
    fn from(donation: &RecentDonation) -> Self {
        Self {
            name: truncate_with_ellipsis(&donation.name, 30),
            amount: donation.amount.clone(),
            time: donation.time.clone(),
        }
    }
}

/// Submit a donation
pub async fn donate(api_client: &ApiClient, form: &DonationForm) -> CliResult<String> {
    let response = api_client
        .post("/api/v1/donations")
        .json(form)
        .send()
        .await?;

    let receipt: DonationReceipt = ApiClient::handle_response(response).await?;
    Ok(format!(
        "✓ Received ₹{} ({})\n{}",
        receipt.amount, receipt.id, receipt.message
    ))
}

/// Latest donations, anonymous donors masked
pub async fn recent_donations(
    api_client: &ApiClient,
    limit: Option<usize>,
    format: &str,
) -> CliResult<String> {
    let mut request = api_client.get("/api/v1/donations/recent");
    if let Some(l) = limit {
        request = request.query(&[("limit", l.to_string())]);
    }
    let donations: Vec<RecentDonation> = ApiClient::handle_response(request.send().await?).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&donations)?),
        _ => Ok(format_table(&donations)),
    }
}

fn format_table(donations: &[RecentDonation]) -> String {
    if donations.is_empty() {
        return "No donations yet.".to_string();
    }

    let display: Vec<DonationDisplay> = donations.iter().map(DonationDisplay::from).collect();
    let mut table = Table::new(display);
    apply_table_style(&mut table);
    table.to_string()
}

/// Monthly progress and impact figures
pub async fn donation_stats(api_client: &ApiClient, format: &str) -> CliResult<String> {
    let monthly: MonthlyDonations = ApiClient::handle_response(
        api_client.get("/api/v1/donations/monthly").send().await?,
    )
    .await?;
    let impact: ImpactStats = ApiClient::handle_response(
        api_client.get("/api/v1/donations/impact").send().await?,
    )
    .await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&serde_json::json!({
            "monthly": monthly,
            "impact": impact,
        }))?),
        _ => Ok(format_stats(&monthly, &impact)),
    }
}

fn format_stats(monthly: &MonthlyDonations, impact: &ImpactStats) -> String {
    use tabled::builder::Builder;

    let percent = if monthly.target == 0 {
        0
    } else {
        (monthly.total * 100 / monthly.target).min(100)
    };

    let mut builder = Builder::default();
    builder.push_record([
        "This month".to_string(),
        format!("₹{} of ₹{} ({}%)", monthly.total, monthly.target, percent),
    ]);
    builder.push_record(["Total raised".to_string(), format!("₹{}", impact.total_raised)]);
    builder.push_record(["Jobs secured".to_string(), impact.jobs_secured.to_string()]);
    builder.push_record([
        "Housing placements".to_string(),
        impact.housing_placements.to_string(),
    ]);
    builder.push_record([
        "Events organized".to_string(),
        impact.events_organized.to_string(),
    ]);

    let mut table = builder.build();
    apply_table_style(&mut table);
    table.to_string()
}
