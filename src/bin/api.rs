//! Portal API server binary.
//!
//! This binary creates the concrete store and auth provider and passes them
//! to the API server. The API layer remains agnostic of the backend.

use std::net::IpAddr;

use clap::Parser;
use miette::Diagnostic;
use portal::api::{self, ApiError, AppState, Config, DEFAULT_PORT};
use portal::auth::{AuthNotifier, RestAuth};
use portal::config::PortalConfig;
use portal::store::{FallbackStore, MemoryStore, RestStore};
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("API server error: {0}")]
    #[diagnostic(code(portal::binary::api))]
    Api(#[from] ApiError),
}

#[derive(Parser)]
#[command(name = "portal-api")]
#[command(author, version, about = "Community portal API server", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Surface store failures instead of serving sample data
    #[arg(long)]
    no_fallback: bool,
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    let cli = Cli::parse();
    let config = PortalConfig::from_env();

    let has_credentials = config.has_credentials();
    let store = FallbackStore::new(
        RestStore::new(config.credentials.clone()),
        MemoryStore::with_fixtures(),
        config.fixture_fallback && !cli.no_fallback,
    );
    let auth = RestAuth::new(config.credentials, config.auth_redirect_url);
    let state = AppState::new(store, auth, AuthNotifier::new(), has_credentials);

    api::run(
        Config {
            host: cli.host,
            port: cli.port,
        },
        state,
    )
    .await?;

    Ok(())
}
