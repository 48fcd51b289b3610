use miette::Diagnostic;
use reqwest::StatusCode;
use thiserror::Error;

/// Failures of a `portal` command, as seen from the client side of `portal-api`.
#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error("Could not reach portal-api")]
    #[diagnostic(
        code(portal::cli::connection_failed),
        help(
            "Start the server with `portal-api` (listens on port 3737), or point the CLI at another instance with --api-url or PORTAL_API_URL."
        )
    )]
    ConnectionFailed {
        #[source]
        source: reqwest::Error,
    },

    #[error("portal-api sent a body the CLI cannot read: {message}")]
    #[diagnostic(
        code(portal::cli::invalid_response),
        help("The CLI and portal-api builds may be out of step; upgrade both together.")
    )]
    InvalidResponse { message: String },

    #[error("Listings store unavailable: {message}")]
    #[diagnostic(
        code(portal::cli::store_unavailable),
        help(
            "portal-api could not reach the hosted store. Check PORTAL_STORE_URL and PORTAL_STORE_ANON_KEY, or run it without --no-fallback to serve the sample listings."
        )
    )]
    StoreUnavailable { message: String },

    #[error("API error ({status}): {message}")]
    #[diagnostic(code(portal::cli::api_error))]
    ApiError { status: u16, message: String },

    #[error("Invalid argument: {message}")]
    #[diagnostic(code(portal::cli::invalid_argument))]
    InvalidArgument { message: String },
}

impl CliError {
    /// Classify a non-success answer from portal-api.
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::BAD_GATEWAY => CliError::StoreUnavailable { message },
            _ => CliError::ApiError {
                status: status.as_u16(),
                message,
            },
        }
    }
}

impl From<reqwest::Error> for CliError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            return CliError::ConnectionFailed { source: e };
        }
        CliError::InvalidResponse {
            message: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::InvalidResponse {
            message: e.to_string(),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
