//! API route configuration.

use axum::Router;
use axum::routing::{get, post};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::error::ErrorResponse;
use super::handlers::{self, HealthResponse};
use super::state::AppState;
use super::v1;
use super::websocket;
use crate::auth::{AuthProvider, Credentials, Session, SignUp, User};
use crate::context::ContextSnapshot;
use crate::services::donations::{
    DonationForm, DonationReceipt, ImpactStats, MonthlyDonations, RecentDonation, RecentDonor,
};
use crate::services::scraper::{JobSite, ScrapeReport, ScraperStatus};
use crate::store::{
    AgeRange, Contact, HousingTour, HousingType, Job, JobType, MatchPreference, MatchProfile,
    NewStory, ProfileUpdate, SeniorLiving, Store, SuccessStory, TableStatus, TourStatus,
};

/// Build routes with generic store and auth provider types.
///
/// Applies the turbofish to every handler so route tables stay readable.
macro_rules! routes {
    ($S:ty, $A:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$S, $A>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Portal API",
        version = "0.3.0",
        description = "Jobs, senior housing, matchmaking, donations and success stories",
        license(name = "GPL-2.0")
    ),
    paths(
        handlers::health,
        v1::list_jobs,
        v1::get_job,
        v1::apply_for_job,
        v1::list_housing,
        v1::get_housing,
        v1::schedule_tour,
        v1::search_matches,
        v1::get_profile,
        v1::save_profile,
        v1::submit_donation,
        v1::recent_donations,
        v1::recent_donors,
        v1::monthly_donations,
        v1::impact_stats,
        v1::list_stories,
        v1::submit_story,
        v1::sign_in,
        v1::sign_up,
        v1::sign_out,
        v1::current_session,
        v1::get_context,
        v1::refresh_context,
        v1::table_statuses,
        v1::trigger_scrape,
        v1::scraper_status,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            Job,
            JobType,
            v1::ApplyRequest,
            v1::ApplyResponse,
            SeniorLiving,
            HousingType,
            Contact,
            v1::ScheduleTourRequest,
            HousingTour,
            TourStatus,
            MatchProfile,
            MatchPreference,
            AgeRange,
            v1::MatchSearchRequest,
            ProfileUpdate,
            DonationForm,
            DonationReceipt,
            RecentDonation,
            RecentDonor,
            MonthlyDonations,
            ImpactStats,
            SuccessStory,
            NewStory,
            Credentials,
            Session,
            SignUp,
            User,
            v1::SessionResponse,
            ContextSnapshot,
            TableStatus,
            JobSite,
            ScrapeReport,
            ScraperStatus,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "jobs", description = "Accessible job listings"),
        (name = "housing", description = "Senior living directory and tours"),
        (name = "matches", description = "Matchmaking search and profiles"),
        (name = "donations", description = "Donations and fundraising progress"),
        (name = "stories", description = "Success stories"),
        (name = "auth", description = "Email/password authentication"),
        (name = "context", description = "Shared portal state"),
        (name = "admin", description = "Store health and job scraper")
    )
)]
pub struct ApiDoc;

/// Create the API router with OpenAPI documentation
pub fn create_router<S: Store, A: AuthProvider + 'static>(state: AppState<S, A>) -> Router {
    let api = ApiDoc::openapi();

    let system_routes = routes!(S, A => {
        get "/health" => handlers::health,
        get "/ws" => websocket::ws_handler,
    });

    let job_routes = routes!(S, A => {
        get "/api/v1/jobs" => v1::list_jobs,
        get "/api/v1/jobs/{id}" => v1::get_job,
        post "/api/v1/jobs/{id}/apply" => v1::apply_for_job,
    });

    let housing_routes = routes!(S, A => {
        get "/api/v1/housing" => v1::list_housing,
        get "/api/v1/housing/{id}" => v1::get_housing,
        post "/api/v1/housing/{id}/tours" => v1::schedule_tour,
    });

    let match_routes = Router::new()
        .route(
            "/api/v1/profile",
            get(v1::get_profile::<S, A>).put(v1::save_profile::<S, A>),
        )
        .merge(routes!(S, A => {
            post "/api/v1/matches/search" => v1::search_matches,
        }));

    let donation_routes = routes!(S, A => {
        post "/api/v1/donations" => v1::submit_donation,
        get "/api/v1/donations/recent" => v1::recent_donations,
        get "/api/v1/donations/donors" => v1::recent_donors,
        get "/api/v1/donations/monthly" => v1::monthly_donations,
        get "/api/v1/donations/impact" => v1::impact_stats,
    });

    let story_routes = Router::new().route(
        "/api/v1/stories",
        get(v1::list_stories::<S, A>).post(v1::submit_story::<S, A>),
    );

    let auth_routes = routes!(S, A => {
        post "/api/v1/auth/signin" => v1::sign_in,
        post "/api/v1/auth/signup" => v1::sign_up,
        post "/api/v1/auth/signout" => v1::sign_out,
        get "/api/v1/auth/session" => v1::current_session,
    });

    let admin_routes = routes!(S, A => {
        get "/api/v1/context" => v1::get_context,
        post "/api/v1/context/refresh" => v1::refresh_context,
        get "/api/v1/admin/tables" => v1::table_statuses,
        post "/api/v1/admin/scrape" => v1::trigger_scrape,
        get "/api/v1/admin/scraper" => v1::scraper_status,
    });

    system_routes
        .merge(job_routes)
        .merge(housing_routes)
        .merge(match_routes)
        .merge(donation_routes)
        .merge(story_routes)
        .merge(auth_routes)
        .merge(admin_routes)
        .merge(Scalar::with_url("/docs", api))
        .with_state(state)
}
