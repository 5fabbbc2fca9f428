//! Upload helper.

use super::error::MediaError;
use super::host::MediaHost;
use super::types::{MediaPayload, UploadOptions, UploadOutcome};

/// Forward one in-memory file to the media host with automatic resource-type
/// detection. No preprocessing, no retries; the host's result comes back
/// unmodified.
pub async fn upload_media(
    host: &dyn MediaHost,
    file: &MediaPayload,
) -> Result<UploadOutcome, MediaError> {
    host.upload(file, &UploadOptions::auto()).await
}
