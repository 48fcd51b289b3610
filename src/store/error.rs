//! Store error types.
//!
//! Errors are backend agnostic: the REST store, the memory store and the
//! fallback decorator all report through `StoreError`.

use miette::Diagnostic;
use thiserror::Error;

/// Data-access errors.
#[derive(Error, Diagnostic, Debug)]
pub enum StoreError {
    #[error("Entity not found: {entity_type} with id '{id}'")]
    #[diagnostic(code(portal::store::not_found))]
    NotFound { entity_type: String, id: String },

    #[error("Validation error: {message}")]
    #[diagnostic(code(portal::store::validation_error))]
    Validation { message: String },

    #[error("Remote store rejected the request ({status}): {message}")]
    #[diagnostic(code(portal::store::remote_error))]
    Remote { status: u16, message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(
        code(portal::store::connection_error),
        help("Check PORTAL_STORE_URL and your network connection.")
    )]
    Connection { message: String },

    #[error("Could not decode store response: {message}")]
    #[diagnostic(code(portal::store::decode_error))]
    Decode { message: String },

    #[error("Store credentials are missing")]
    #[diagnostic(
        code(portal::store::credentials_missing),
        help("Set PORTAL_STORE_URL and PORTAL_STORE_ANON_KEY to enable the hosted store.")
    )]
    CredentialsMissing,
}

impl StoreError {
    /// True for failures of the remote path itself (as opposed to bad input).
    pub fn is_remote_failure(&self) -> bool {
        matches!(
            self,
            StoreError::Remote { .. }
                | StoreError::Connection { .. }
                | StoreError::Decode { .. }
                | StoreError::CredentialsMissing
        )
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            StoreError::Decode {
                message: e.to_string(),
            }
        } else {
            StoreError::Connection {
                message: e.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Decode {
            message: e.to_string(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
