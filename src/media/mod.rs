//! Media upload gateway.
//!
//! A thin pass-through to an external media host: one file per call, fully
//! buffered in memory, `resource_type: auto`, and the host's result object
//! returned verbatim. Nothing is staged on local disk.

pub mod error;
pub mod host;
pub mod service;
pub mod types;

// Re-exports for convenience
pub use error::MediaError;
pub use host::{HttpMediaHost, MediaHost, MockMediaHost};
pub use service::upload_media;
pub use types::{MediaPayload, UploadOptions, UploadOutcome};
