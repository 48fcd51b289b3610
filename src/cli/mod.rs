pub mod api_client;
mod commands;
pub mod error;
mod utils;

#[cfg(test)]
mod api_client_test;

use clap::{Parser, Subcommand};

use crate::services::donations::DonationForm;
use crate::store::NewStory;
use commands::PageParams;
use error::CliResult;

#[derive(Parser)]
#[command(name = "portal")]
#[command(author, version, about = "Community portal CLI", long_about = None)]
pub struct Cli {
    /// Override the API URL (default: PORTAL_API_URL env or http://localhost:3737)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Job listings
    Jobs {
        #[command(subcommand)]
        command: JobCommands,
    },
    /// Senior living directory
    Housing {
        #[command(subcommand)]
        command: HousingCommands,
    },
    /// Matchmaking
    Matches {
        #[command(subcommand)]
        command: MatchCommands,
    },
    /// Make a donation
    Donate {
        /// Amount in rupees
        amount: String,
        /// Donor name
        #[arg(long)]
        name: String,
        /// Donor email
        #[arg(long)]
        email: String,
        /// Give every month
        #[arg(long)]
        monthly: bool,
        /// Hide the donor name in public listings
        #[arg(long)]
        anonymous: bool,
        /// Message shown with the donation
        #[arg(short, long)]
        message: Option<String>,
    },
    /// Donation feeds and totals
    Donations {
        #[command(subcommand)]
        command: DonationCommands,
    },
    /// Success stories
    Stories {
        #[command(subcommand)]
        command: StoryCommands,
    },
    /// Administration
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

#[derive(Subcommand)]
enum JobCommands {
    /// List jobs, newest first
    List {
        /// Location substring
        #[arg(long)]
        location: Option<String>,
        /// Employment type (Full-time, Part-time, Contract, Remote, Internship)
        #[arg(long = "type")]
        job_type: Option<String>,
        /// Keyword in title or description
        #[arg(long)]
        keyword: Option<String>,
        /// Accommodations, comma-separated
        #[arg(long)]
        accessibility: Option<String>,
        #[arg(long)]
        page: Option<usize>,
        #[arg(long)]
        page_size: Option<usize>,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Show a job
    Show {
        id: String,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Record an application and print the application URL
    Apply {
        id: String,
        /// Applicant user ID
        #[arg(long)]
        user_id: Option<String>,
    },
}

#[derive(Subcommand)]
enum HousingCommands {
    /// List facilities, best rated first
    List {
        #[arg(long)]
        location: Option<String>,
        /// Facility type, e.g. "Assisted Living"
        #[arg(long = "type")]
        housing_type: Option<String>,
        /// Monthly price range, "min-max" or "min"
        #[arg(long)]
        price: Option<String>,
        /// Required amenities, comma-separated
        #[arg(long)]
        amenities: Option<String>,
        /// Accommodations, comma-separated
        #[arg(long)]
        accessibility: Option<String>,
        #[arg(long)]
        page: Option<usize>,
        #[arg(long)]
        page_size: Option<usize>,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Show a facility
    Show {
        id: String,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Book a visit
    Tour {
        id: String,
        /// Visit date, e.g. 2025-06-01
        #[arg(long)]
        date: String,
        /// Visit time, e.g. 10:30
        #[arg(long)]
        time: String,
        #[arg(long, default_value = "")]
        notes: String,
        /// Visitor user ID
        #[arg(long)]
        user_id: Option<String>,
    },
}

#[derive(Subcommand)]
enum MatchCommands {
    /// Find compatible profiles
    Find {
        #[arg(long)]
        min_age: Option<u32>,
        #[arg(long)]
        max_age: Option<u32>,
        /// Accepted genders, comma-separated
        #[arg(long)]
        gender: Option<String>,
        /// Relationship goals, comma-separated
        #[arg(long)]
        looking_for: Option<String>,
        /// Interests, comma-separated
        #[arg(long)]
        interests: Option<String>,
        #[arg(long)]
        page: Option<usize>,
        #[arg(long)]
        page_size: Option<usize>,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
}

#[derive(Subcommand)]
enum DonationCommands {
    /// Latest donations
    Recent {
        #[arg(long)]
        limit: Option<usize>,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Monthly progress and impact
    Stats {
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
}

#[derive(Subcommand)]
enum StoryCommands {
    /// Published stories
    List {
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Submit a story for review
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: u32,
        /// The story text
        story: String,
        #[arg(long, default_value = "")]
        program: String,
        #[arg(long, default_value = "")]
        impact: String,
    },
}

#[derive(Subcommand)]
enum AdminCommands {
    /// Server status
    Health,
    /// Table existence and row counts
    Tables {
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Run the job scraper once
    Scrape,
    /// Scraper sites and last run
    Scraper {
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
}

async fn dispatch(api_client: &api_client::ApiClient, command: Commands) -> CliResult<String> {
    match command {
        Commands::Jobs { command } => match command {
            JobCommands::List {
                location,
                job_type,
                keyword,
                accessibility,
                page,
                page_size,
                format,
            } => {
                let query = commands::jobs::JobQuery {
                    location: location.as_deref(),
                    job_type: job_type.as_deref(),
                    keyword: keyword.as_deref(),
                    accessibility: accessibility.as_deref(),
                };
                let page = PageParams { page, page_size };
                commands::jobs::list_jobs(api_client, &query, page, &format).await
            }
            JobCommands::Show { id, format } => {
                commands::jobs::get_job(api_client, &id, &format).await
            }
            JobCommands::Apply { id, user_id } => {
                commands::jobs::apply_for_job(api_client, &id, user_id.as_deref()).await
            }
        },
        Commands::Housing { command } => match command {
            HousingCommands::List {
                location,
                housing_type,
                price,
                amenities,
                accessibility,
                page,
                page_size,
                format,
            } => {
                let query = commands::housing::HousingQuery {
                    location: location.as_deref(),
                    housing_type: housing_type.as_deref(),
                    price: price.as_deref(),
                    amenities: amenities.as_deref(),
                    accessibility: accessibility.as_deref(),
                };
                let page = PageParams { page, page_size };
                commands::housing::list_housing(api_client, &query, page, &format).await
            }
            HousingCommands::Show { id, format } => {
                commands::housing::get_housing(api_client, &id, &format).await
            }
            HousingCommands::Tour {
                id,
                date,
                time,
                notes,
                user_id,
            } => {
                let request = commands::housing::TourRequest {
                    user_id,
                    tour_date: date,
                    tour_time: time,
                    notes,
                };
                commands::housing::schedule_tour(api_client, &id, request).await
            }
        },
        Commands::Matches { command } => match command {
            MatchCommands::Find {
                min_age,
                max_age,
                gender,
                looking_for,
                interests,
                page,
                page_size,
                format,
            } => {
                let args = commands::matches::MatchArgs {
                    min_age,
                    max_age,
                    gender: gender.as_deref(),
                    looking_for: looking_for.as_deref(),
                    interests: interests.as_deref(),
                };
                let page = PageParams { page, page_size };
                commands::matches::find_matches(api_client, &args, page, &format).await
            }
        },
        Commands::Donate {
            amount,
            name,
            email,
            monthly,
            anonymous,
            message,
        } => {
            let form = DonationForm {
                amount,
                custom_amount: None,
                donor_name: name,
                donor_email: email,
                is_monthly: monthly,
                anonymous,
                message,
            };
            commands::donations::donate(api_client, &form).await
        }
        Commands::Donations { command } => match command {
            DonationCommands::Recent { limit, format } => {
                commands::donations::recent_donations(api_client, limit, &format).await
            }
            DonationCommands::Stats { format } => {
                commands::donations::donation_stats(api_client, &format).await
            }
        },
        Commands::Stories { command } => match command {
            StoryCommands::List { format } => {
                commands::stories::list_stories(api_client, &format).await
            }
            StoryCommands::Submit {
                name,
                age,
                story,
                program,
                impact,
            } => {
                let story = NewStory {
                    name,
                    age,
                    image: String::new(),
                    story,
                    program,
                    impact,
                    submission_date: None,
                };
                commands::stories::submit_story(api_client, &story).await
            }
        },
        Commands::Admin { command } => match command {
            AdminCommands::Health => commands::admin::health(api_client).await,
            AdminCommands::Tables { format } => {
                commands::admin::table_statuses(api_client, &format).await
            }
            AdminCommands::Scrape => commands::admin::trigger_scrape(api_client).await,
            AdminCommands::Scraper { format } => {
                commands::admin::scraper_status(api_client, &format).await
            }
        },
    }
}

pub async fn run() -> miette::Result<()> {
    let cli = Cli::parse();
    let api_client = api_client::ApiClient::new(cli.api_url);

    match cli.command {
        Some(command) => match dispatch(&api_client, command).await {
            Ok(output) => println!("{}", output),
            Err(e) => eprintln!("Error: {}", e),
        },
        None => {
            // Show help when no command provided
            let _ = Cli::parse_from(["portal", "--help"]);
        }
    }
    Ok(())
}
