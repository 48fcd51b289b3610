use serde::Serialize;
use tabled::{Table, Tabled};

use crate::cli::api_client::ApiClient;
use crate::cli::commands::{PageParams, page_footer, with_param};
use crate::cli::error::CliResult;
use crate::cli::utils::{apply_table_style, format_list, truncate_with_ellipsis};
use crate::store::{HousingTour, Page, SeniorLiving};

/// Housing list filters as given on the command line
#[derive(Debug, Default)]
pub struct HousingQuery<'a> {
    pub location: Option<&'a str>,
    pub housing_type: Option<&'a str>,
    /// "min-max" or "min" monthly rupees
    pub price: Option<&'a str>,
    pub amenities: Option<&'a str>,
    pub accessibility: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct TourRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub tour_date: String,
    pub tour_time: String,
    pub notes: String,
}

#[derive(Tabled)]
struct HousingDisplay {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    housing_type: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Rating")]
    rating: String,
}

impl From<&SeniorLiving> for HousingDisplay {
    fn from(home: &SeniorLiving) -> Self {
        Self {
            id: truncate_with_ellipsis(&home.id, 12),
            name: truncate_with_ellipsis(&home.name, 40),
            housing_type: home.housing_type.to_string(),
            location: truncate_with_ellipsis(&home.location, 30),
            price: home.price.clone(),
            rating: format!("{:.1} ({})", home.rating, home.review_count),
        }
    }
}

/// List senior living facilities
pub async fn list_housing(
    api_client: &ApiClient,
    query: &HousingQuery<'_>,
    page: PageParams,
    format: &str,
) -> CliResult<String> {
    let mut request = api_client.get("/api/v1/housing");
    request = with_param(request, "location", query.location);
    request = with_param(request, "type", query.housing_type);
    request = with_param(request, "price", query.price);
    request = with_param(request, "amenities", query.amenities);
    request = with_param(request, "accessibility", query.accessibility);
    request = page.apply(request);

    let response: Page<SeniorLiving> = ApiClient::handle_response(request.send().await?).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&response.items)?),
        _ => Ok(format_table(&response)),
    }
}

fn format_table(page: &Page<SeniorLiving>) -> String {
    if page.items.is_empty() {
        return "No senior living options found.".to_string();
    }

    let display: Vec<HousingDisplay> = page.items.iter().map(HousingDisplay::from).collect();
    let mut table = Table::new(display);
    apply_table_style(&mut table);
    format!(
        "{}\n{}",
        table,
        page_footer(page.page, page.total_pages, page.total_items, "facilities")
    )
}

/// Get a single facility by ID
pub async fn get_housing(api_client: &ApiClient, id: &str, format: &str) -> CliResult<String> {
    let response = api_client
        .get(&format!("/api/v1/housing/{}", id))
        .send()
        .await?;
    let home: SeniorLiving = ApiClient::handle_response(response).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&home)?),
        _ => Ok(format_housing_detail(&home)),
    }
}

fn format_housing_detail(home: &SeniorLiving) -> String {
    use tabled::builder::Builder;

    let mut builder = Builder::default();

    builder.push_record(["Facility ID", &home.id]);
    builder.push_record(["Name", &home.name]);
    builder.push_record(["Type", &home.housing_type.to_string()]);
    builder.push_record(["Address", &home.address]);
    builder.push_record(["Price", &home.price]);
    builder.push_record(["Rating", &format!("{:.1} ({} reviews)", home.rating, home.review_count)]);
    builder.push_record(["Amenities", &format_list(&home.amenities)]);
    builder.push_record(["Accessibility", &format_list(&home.accessibility)]);
    builder.push_record(["Openings", if home.openings { "Yes" } else { "No" }]);
    builder.push_record(["Phone", &home.contact.phone]);
    builder.push_record(["Email", &home.contact.email]);

    let mut table = builder.build();
    apply_table_style(&mut table);
    table.to_string()
}

/// Book a visit to a facility
pub async fn schedule_tour(
    api_client: &ApiClient,
    id: &str,
    request: TourRequest,
) -> CliResult<String> {
    let response = api_client
        .post(&format!("/api/v1/housing/{}/tours", id))
        .json(&request)
        .send()
        .await?;

    let tour: HousingTour = ApiClient::handle_response(response).await?;
    Ok(format!(
        "✓ Tour scheduled for {} at {} ({})",
        tour.tour_date, tour.tour_time, tour.id
    ))
}
