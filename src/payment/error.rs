use thiserror::Error;

/// Failures talking to the payment provider. Outcome-level results
/// (cancelled, failed) are not errors; they arrive as
/// [`super::PaymentOutcome`] values.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The client SDK script could not be fetched.
    #[error("SDK load failed: {0}")]
    SdkLoad(String),

    /// Transport-level failure talking to the session API.
    #[error("provider request failed: {0}")]
    Http(String),

    /// The provider answered with something we cannot parse.
    #[error("malformed provider response: {0}")]
    BadResponse(String),
}
