//! Media upload gateway.
//!
//! Accepts a single multipart file and forwards it to the configured
//! media host. The host's JSON response is returned verbatim inside the
//! standard envelope so clients see exactly what the host reported.

use std::sync::Arc;

use axum::{Json, extract::Multipart, extract::State, http::StatusCode};
use tracing::{error, info};

use crate::media::{self, MediaError, MediaPayload, UploadOutcome};

use super::super::state::AppState;
use super::super::types::{ApiResponse, error_codes};
use super::helpers::{ApiError, api_error};

const FIELD_NAME_FALLBACK: &str = "file";

pub async fn upload_media(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UploadOutcome>>, ApiError> {
    // Single-file endpoint: the first part is the upload, anything after
    // it is ignored.
    let field = match multipart.next_field().await {
        Ok(Some(field)) => field,
        Ok(None) => {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                error_codes::INVALID_PARAMETER,
                "No file in request body",
            ));
        }
        Err(e) => {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                error_codes::INVALID_PARAMETER,
                format!("Malformed multipart body: {e}"),
            ));
        }
    };

    let file_name = field
        .file_name()
        .unwrap_or(FIELD_NAME_FALLBACK)
        .to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    let bytes = field.bytes().await.map_err(|e| {
        api_error(
            StatusCode::BAD_REQUEST,
            error_codes::INVALID_PARAMETER,
            format!("Failed to read file body: {e}"),
        )
    })?;

    let payload = MediaPayload::new(bytes.to_vec(), &content_type, &file_name);
    info!(
        file_name = %payload.file_name,
        size = payload.bytes.len(),
        "forwarding media upload"
    );

    match media::upload_media(state.media_host.as_ref(), &payload).await {
        Ok(outcome) => Ok(Json(ApiResponse::success(outcome))),
        Err(MediaError::Rejected { status, body }) => {
            error!(status, "media host rejected upload");
            // Mirror the host's status so clients can tell a host-side
            // rejection apart from a gateway fault.
            let status =
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            Err(api_error(
                status,
                error_codes::UPLOAD_FAILED,
                body.to_string(),
            ))
        }
        Err(e) => {
            error!(error = %e, "media upload failed");
            Err(api_error(
                StatusCode::BAD_GATEWAY,
                error_codes::UPLOAD_FAILED,
                "Media host unreachable",
            ))
        }
    }
}
