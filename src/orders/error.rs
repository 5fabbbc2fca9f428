use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderStoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Order payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored row carries a status string this build does not know.
    #[error("Unknown status value in store: {0}")]
    UnknownStatus(String),

    #[error("Order store unavailable: {0}")]
    Unavailable(String),
}
