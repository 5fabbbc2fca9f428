use thiserror::Error;

/// Upload failures. The gateway adds no recovery of its own: whatever the
/// host raises is carried to the caller.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("upload transport failed: {0}")]
    Transport(String),

    #[error("malformed media host response: {0}")]
    BadResponse(String),

    /// The host answered with an error document; `body` is its verbatim
    /// response.
    #[error("media host rejected upload with HTTP {status}")]
    Rejected {
        status: u16,
        body: serde_json::Value,
    },
}
