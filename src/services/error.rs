use miette::Diagnostic;
use thiserror::Error;

use crate::store::StoreError;

/// Failure of a form submission (donation, story, profile, tour).
///
/// Validation variants are raised before any remote call.
#[derive(Error, Diagnostic, Debug)]
pub enum SubmissionError {
    #[error("Please enter a valid donation amount.")]
    #[diagnostic(code(portal::submission::invalid_amount))]
    InvalidAmount,

    #[error("{field} is required")]
    #[diagnostic(code(portal::submission::missing_field))]
    MissingField { field: &'static str },

    #[error("{message}")]
    #[diagnostic(code(portal::submission::remote))]
    Remote {
        message: String,
        #[source]
        source: StoreError,
    },
}

impl SubmissionError {
    pub fn missing(field: &'static str) -> Self {
        SubmissionError::MissingField { field }
    }

    pub fn remote(message: impl Into<String>, source: StoreError) -> Self {
        SubmissionError::Remote {
            message: message.into(),
            source,
        }
    }

    /// True for failures caught before contacting the store.
    pub fn is_validation(&self) -> bool {
        !matches!(self, SubmissionError::Remote { .. })
    }
}

/// Reject blank required text fields.
pub(crate) fn require(field: &'static str, value: &str) -> Result<(), SubmissionError> {
    if value.trim().is_empty() {
        return Err(SubmissionError::missing(field));
    }
    Ok(())
}
