//! System health and status handlers.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::auth::AuthProvider;
use crate::store::Store;

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    #[schema(example = "ok")]
    pub status: String,
    /// `configured` or `missing`
    #[schema(example = "configured")]
    pub credentials: String,
}

/// Health check endpoint
///
/// Reports whether hosted store credentials are configured. Without them
/// the portal serves fixture data and sign-in is unavailable.
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Health check successful", body = HealthResponse)
    )
)]
#[instrument(skip(state))]
pub async fn health<S: Store, A: AuthProvider + 'static>(
    State(state): State<AppState<S, A>>,
) -> Json<HealthResponse> {
    let credentials = if state.store_configured() {
        "configured"
    } else {
        "missing"
    };
    Json(HealthResponse {
        status: "ok".to_string(),
        credentials: credentials.to_string(),
    })
}
