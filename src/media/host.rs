//! Media host seam and implementations.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use reqwest::multipart::Form;
use tracing::{debug, info};

use crate::config::MediaConfig;

use super::error::MediaError;
use super::types::{MediaPayload, UploadOptions, UploadOutcome};

#[async_trait]
pub trait MediaHost: Send + Sync {
    /// Push one file to the host. The outcome is the host's response body,
    /// untouched.
    async fn upload(
        &self,
        file: &MediaPayload,
        options: &UploadOptions,
    ) -> Result<UploadOutcome, MediaError>;
}

/// HTTP client for a Cloudinary-style upload API. Credentials come from
/// config; the request carries the file as a base64 data URI.
#[derive(Clone)]
pub struct HttpMediaHost {
    config: MediaConfig,
    client: reqwest::Client,
}

impl HttpMediaHost {
    pub fn new(config: MediaConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");
        Self { config, client }
    }

    fn upload_url(&self) -> String {
        format!(
            "{}/{}/auto/upload",
            self.config.upload_base.trim_end_matches('/'),
            self.config.cloud_name
        )
    }
}

#[async_trait]
impl MediaHost for HttpMediaHost {
    async fn upload(
        &self,
        file: &MediaPayload,
        options: &UploadOptions,
    ) -> Result<UploadOutcome, MediaError> {
        let form = Form::new()
            .text("file", file.data_uri())
            .text("resource_type", options.resource_type.clone())
            .text("api_key", self.config.api_key.clone());

        debug!(file = %file.file_name, bytes = file.bytes.len(), "uploading to media host");

        let resp = self
            .client
            .post(self.upload_url())
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .multipart(form)
            .send()
            .await
            .map_err(|e| MediaError::Transport(e.to_string()))?;

        let status = resp.status();
        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| MediaError::BadResponse(e.to_string()))?;

        if !status.is_success() {
            return Err(MediaError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        info!(file = %file.file_name, "media upload accepted");
        Ok(UploadOutcome(body))
    }
}

/// Recording mock host for tests and offline development.
pub struct MockMediaHost {
    result: serde_json::Value,
    reject: AtomicBool,
    uploads: Mutex<Vec<(MediaPayload, UploadOptions)>>,
}

impl MockMediaHost {
    /// Every upload succeeds with the given result document.
    pub fn returning(result: serde_json::Value) -> Self {
        Self {
            result,
            reject: AtomicBool::new(false),
            uploads: Mutex::new(Vec::new()),
        }
    }

    /// Every upload is rejected with the given error document.
    pub fn rejecting(error_body: serde_json::Value) -> Self {
        let host = Self::returning(error_body);
        host.reject.store(true, Ordering::SeqCst);
        host
    }

    pub fn uploads(&self) -> Vec<(MediaPayload, UploadOptions)> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaHost for MockMediaHost {
    async fn upload(
        &self,
        file: &MediaPayload,
        options: &UploadOptions,
    ) -> Result<UploadOutcome, MediaError> {
        self.uploads
            .lock()
            .unwrap()
            .push((file.clone(), options.clone()));
        if self.reject.load(Ordering::SeqCst) {
            return Err(MediaError::Rejected {
                status: 400,
                body: self.result.clone(),
            });
        }
        Ok(UploadOutcome(self.result.clone()))
    }
}
