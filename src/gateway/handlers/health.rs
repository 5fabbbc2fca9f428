//! Health check handler

use std::time::{SystemTime, UNIX_EPOCH};

use axum::Json;
use utoipa::ToSchema;

use super::super::types::ApiResponse;

/// Health check response data
#[derive(serde::Serialize, ToSchema)]
pub struct HealthResponse {
    /// Server timestamp in milliseconds
    #[schema(example = 1703494800000_u64)]
    pub timestamp_ms: u64,
    /// Crate version
    pub version: &'static str,
    /// Git commit hash at build time
    pub build: &'static str,
}

/// Health check endpoint
///
/// Liveness only: answers 200 with build info as long as the process is up.
/// Collaborator outages (database, payment provider, media host) surface on
/// their own endpoints, not here.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse, content_type = "application/json")
    ),
    tag = "System"
)]
pub async fn health_check() -> Json<ApiResponse<HealthResponse>> {
    let now_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    Json(ApiResponse::success(HealthResponse {
        timestamp_ms: now_ms,
        version: env!("CARGO_PKG_VERSION"),
        build: env!("GIT_HASH"),
    }))
}
