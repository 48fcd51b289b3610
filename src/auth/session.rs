//! Credentials, users and sessions.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::{AuthError, AuthResult};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Email and password as typed by the user.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Credentials {
    #[schema(example = "asha@example.com")]
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.trim().to_string(),
            password: password.to_string(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// An account known to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: String,
    pub email: String,
}

/// A signed-in session.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub user: User,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// Result of a registration.
///
/// `session` is `None` while the provider waits for email confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SignUp {
    pub user: User,
    pub session: Option<Session>,
}

/// Loose structural check: `local@domain.tld`, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((name, tld)) => !name.is_empty() && !tld.is_empty() && !name.ends_with('.'),
        None => false,
    }
}

pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
        && password.chars().any(|c| c.is_uppercase())
        && password.chars().any(|c| c.is_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

/// Checks applied before a registration leaves the process.
pub fn validate_sign_up(credentials: &Credentials) -> AuthResult<()> {
    if !is_valid_email(&credentials.email) {
        return Err(AuthError::InvalidEmail);
    }
    if !is_strong_password(&credentials.password) {
        return Err(AuthError::WeakPassword);
    }
    Ok(())
}

/// Checks applied before a sign-in leaves the process.
///
/// Password strength is not enforced so accounts created under older rules
/// can still sign in.
pub fn validate_sign_in(credentials: &Credentials) -> AuthResult<()> {
    if !is_valid_email(&credentials.email) {
        return Err(AuthError::InvalidEmail);
    }
    if credentials.password.is_empty() {
        return Err(AuthError::Rejected {
            message: "Password is required".to_string(),
        });
    }
    Ok(())
}
