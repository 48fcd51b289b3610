//! Runtime configuration resolved from the environment.
//!
//! | Variable                    | Meaning                                      |
//! |-----------------------------|----------------------------------------------|
//! | `PORTAL_STORE_URL`          | Base URL of the hosted store                 |
//! | `PORTAL_STORE_ANON_KEY`     | Public (anon) key sent with every request    |
//! | `PORTAL_FIXTURE_FALLBACK`   | `false`/`0`/`no`/`off` disables fixtures     |
//! | `PORTAL_AUTH_REDIRECT_URL`  | Where confirmation emails send new accounts  |

use std::env;
use std::fmt;

pub const STORE_URL_VAR: &str = "PORTAL_STORE_URL";
pub const STORE_ANON_KEY_VAR: &str = "PORTAL_STORE_ANON_KEY";
pub const FIXTURE_FALLBACK_VAR: &str = "PORTAL_FIXTURE_FALLBACK";
pub const AUTH_REDIRECT_VAR: &str = "PORTAL_AUTH_REDIRECT_URL";

/// Connection details for the hosted store.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreCredentials {
    pub url: String,
    pub anon_key: String,
}

// The key never ends up in logs.
impl fmt::Debug for StoreCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreCredentials")
            .field("url", &self.url)
            .field("anon_key", &"***")
            .finish()
    }
}

/// Portal configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    /// `None` when either the URL or the key is missing or blank.
    pub credentials: Option<StoreCredentials>,
    /// Serve fixture data when the store is unreachable or empty.
    pub fixture_fallback: bool,
    /// Redirect target for sign-up confirmation links.
    pub auth_redirect_url: Option<String>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            fixture_fallback: true,
            auth_redirect_url: None,
        }
    }
}

impl PortalConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve the configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let credentials = match (non_blank(STORE_URL_VAR), non_blank(STORE_ANON_KEY_VAR)) {
            (Some(url), Some(anon_key)) => Some(StoreCredentials { url, anon_key }),
            _ => None,
        };

        let fixture_fallback = non_blank(FIXTURE_FALLBACK_VAR)
            .map(|v| parse_flag(&v).unwrap_or(true))
            .unwrap_or(true);

        Self {
            credentials,
            fixture_fallback,
            auth_redirect_url: non_blank(AUTH_REDIRECT_VAR),
        }
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }
}

/// Install the process-wide TLS crypto provider used by every HTTP client.
///
/// Safe to call repeatedly; only the first call has an effect.
pub fn install_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
