use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum AuthError {
    #[error("Authentication is unavailable: store credentials are missing")]
    #[diagnostic(
        code(portal::auth::credentials_missing),
        help("Set PORTAL_STORE_URL and PORTAL_STORE_ANON_KEY to enable sign-in.")
    )]
    CredentialsMissing,

    #[error("Please enter a valid email address")]
    #[diagnostic(code(portal::auth::invalid_email))]
    InvalidEmail,

    #[error(
        "Password must be at least 8 characters and contain upper-case, lower-case letters and a digit"
    )]
    #[diagnostic(code(portal::auth::weak_password))]
    WeakPassword,

    #[error("Authentication failed: {message}")]
    #[diagnostic(code(portal::auth::rejected))]
    Rejected { message: String },

    #[error("Could not reach the authentication service: {message}")]
    #[diagnostic(code(portal::auth::connection))]
    Connection { message: String },

    #[error("You are not signed in")]
    #[diagnostic(code(portal::auth::not_signed_in))]
    NotSignedIn,
}

impl AuthError {
    /// Input problems detected before contacting the provider.
    pub fn is_validation(&self) -> bool {
        matches!(self, AuthError::InvalidEmail | AuthError::WeakPassword)
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(e: reqwest::Error) -> Self {
        AuthError::Connection {
            message: e.to_string(),
        }
    }
}

pub type AuthResult<T> = Result<T, AuthError>;
