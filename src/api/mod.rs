//! HTTP API server.

mod error;
mod handlers;
pub mod routes;
mod state;
mod v1;
pub mod websocket;

#[cfg(test)]
mod mod_test;
#[cfg(test)]
pub(crate) mod test_support;
#[cfg(test)]
mod websocket_test;

use std::net::IpAddr;
use std::sync::Arc;

use miette::Diagnostic;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::ErrorResponse;
pub use state::AppState;

use crate::auth::AuthProvider;
use crate::store::Store;

pub const DEFAULT_PORT: u16 = 3737;

/// API server configuration
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("Failed to bind {addr}: {source}")]
    #[diagnostic(
        code(portal::api::bind),
        help("Is another process listening on this port? Try --port.")
    )]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    #[diagnostic(code(portal::api::serve))]
    Serve(#[from] std::io::Error),
}

/// Initialize tracing subscriber with env filter
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portal=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Run the API server with the given configuration
///
/// Checks store connectivity, loads the first listing pages and starts the
/// auth subscription before accepting connections.
pub async fn run<S: Store, A: AuthProvider + 'static>(
    config: Config,
    state: AppState<S, A>,
) -> Result<(), ApiError> {
    init_tracing();

    match state.store().ping().await {
        Ok(()) => info!("Store connection established"),
        Err(e) => warn!(error = %e, "Store unreachable, serving what is available"),
    }
    if !state.store_configured() {
        warn!("Store credentials are missing; sign-in is disabled");
    }

    let context = Arc::clone(state.context());
    context.mount().await;
    let _subscription = context.listen(state.notifier()).await;

    let app = routes::create_router(state).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ApiError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!("API server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
