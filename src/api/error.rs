//! Error responses.
//!
//! Every failing handler answers `{"error": "..."}` with a status derived
//! from the error kind: bad input is 400, a missing entity 404, a missing
//! session 401 and a failing store or provider 502.

use axum::Json;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::AuthError;
use crate::context::ContextError;
use crate::services::SubmissionError;
use crate::store::StoreError;

/// Error response DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "Job '42' not found")]
    pub error: String,
}

pub type ApiFailure = (StatusCode, Json<ErrorResponse>);

pub fn failure(status: StatusCode, message: impl Into<String>) -> ApiFailure {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

pub fn bad_request(message: impl Into<String>) -> ApiFailure {
    failure(StatusCode::BAD_REQUEST, message)
}

pub fn store_failure(e: StoreError) -> ApiFailure {
    let status = match &e {
        StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
        StoreError::Validation { .. } => StatusCode::BAD_REQUEST,
        e if e.is_remote_failure() => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    failure(status, e.to_string())
}

pub fn submission_failure(e: SubmissionError) -> ApiFailure {
    let status = if e.is_validation() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::BAD_GATEWAY
    };
    failure(status, e.to_string())
}

pub fn auth_failure(e: AuthError) -> ApiFailure {
    let status = match e {
        AuthError::InvalidEmail | AuthError::WeakPassword => StatusCode::BAD_REQUEST,
        AuthError::Rejected { .. } | AuthError::NotSignedIn => StatusCode::UNAUTHORIZED,
        AuthError::CredentialsMissing | AuthError::Connection { .. } => StatusCode::BAD_GATEWAY,
    };
    failure(status, e.to_string())
}

pub fn context_failure(e: ContextError) -> ApiFailure {
    match e {
        ContextError::SignInRequired => failure(StatusCode::UNAUTHORIZED, e.to_string()),
        ContextError::Store(inner) => store_failure(inner),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let not_found = StoreError::NotFound {
            entity_type: "Job".to_string(),
            id: "9".to_string(),
        };
        assert_eq!(store_failure(not_found).0, StatusCode::NOT_FOUND);
        assert_eq!(
            store_failure(StoreError::CredentialsMissing).0,
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            submission_failure(SubmissionError::InvalidAmount).0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            auth_failure(AuthError::WeakPassword).0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            auth_failure(AuthError::NotSignedIn).0,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            context_failure(ContextError::SignInRequired).0,
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_body_carries_message() {
        let (_, Json(body)) = submission_failure(SubmissionError::InvalidAmount);
        assert_eq!(body.error, "Please enter a valid donation amount.");
    }
}
