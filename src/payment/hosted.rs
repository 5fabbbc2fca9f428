//! Hosted checkout HTTP client.
//!
//! Talks to a Razorpay-style provider: probe the client script, create a
//! session from the options bag, then poll the session until it reaches a
//! terminal status. The poll loop runs in a spawned task and reports through
//! the oneshot receiver handed back by `open`.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::config::PaymentConfig;

use super::error::PaymentError;
use super::provider::PaymentProvider;
use super::types::{PaymentOutcome, PaymentSession};

#[derive(Clone)]
pub struct HostedCheckout {
    config: PaymentConfig,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct SessionCreated {
    id: String,
}

#[derive(Debug, Deserialize)]
struct SessionStatus {
    status: String,
    #[serde(default)]
    payment_id: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl HostedCheckout {
    pub fn new(config: PaymentConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");
        Self { config, client }
    }

    fn sessions_url(&self) -> String {
        format!("{}/sessions", self.config.api_base.trim_end_matches('/'))
    }

    fn session_url(&self, id: &str) -> String {
        format!("{}/{}", self.sessions_url(), id)
    }

    /// Map a status document to its terminal outcome; None while the session
    /// is still in flight.
    fn terminal_outcome(status: &SessionStatus) -> Option<PaymentOutcome> {
        match status.status.as_str() {
            "completed" | "paid" => Some(PaymentOutcome::Completed {
                payment_id: status.payment_id.clone().unwrap_or_default(),
            }),
            "cancelled" | "dismissed" => Some(PaymentOutcome::Cancelled),
            "failed" => Some(PaymentOutcome::Failed(
                status
                    .error
                    .clone()
                    .unwrap_or_else(|| "payment failed".to_string()),
            )),
            _ => None,
        }
    }

    async fn fetch_status(&self, id: &str) -> Result<SessionStatus, PaymentError> {
        let resp = self
            .client
            .get(self.session_url(id))
            .send()
            .await
            .map_err(|e| PaymentError::Http(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(PaymentError::Http(format!(
                "status query returned HTTP {}",
                resp.status()
            )));
        }
        resp.json::<SessionStatus>()
            .await
            .map_err(|e| PaymentError::BadResponse(e.to_string()))
    }

    /// Poll until the session is terminal or the configured timeout passes.
    /// Transient poll errors are logged and retried; only the deadline turns
    /// them into a failed outcome.
    async fn poll_session(&self, id: &str) -> PaymentOutcome {
        let interval = Duration::from_millis(self.config.poll_interval_ms.max(1));
        let deadline = tokio::time::Instant::now()
            + Duration::from_millis(self.config.session_timeout_ms);

        loop {
            match self.fetch_status(id).await {
                Ok(status) => {
                    if let Some(outcome) = Self::terminal_outcome(&status) {
                        return outcome;
                    }
                    debug!(session_id = %id, status = %status.status, "session still open");
                }
                Err(e) => {
                    warn!(session_id = %id, error = %e, "session status poll failed");
                }
            }

            if tokio::time::Instant::now() >= deadline {
                return PaymentOutcome::Failed("session timed out".to_string());
            }
            tokio::time::sleep(interval).await;
        }
    }
}

#[async_trait]
impl PaymentProvider for HostedCheckout {
    async fn load_sdk(&self) -> Result<(), PaymentError> {
        let resp = self
            .client
            .get(&self.config.script_url)
            .send()
            .await
            .map_err(|e| PaymentError::SdkLoad(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(PaymentError::SdkLoad(format!(
                "script fetch returned HTTP {}",
                resp.status()
            )));
        }
        debug!(url = %self.config.script_url, "payment SDK reachable");
        Ok(())
    }

    async fn open(
        &self,
        session: PaymentSession,
    ) -> Result<oneshot::Receiver<PaymentOutcome>, PaymentError> {
        let resp = self
            .client
            .post(self.sessions_url())
            .json(&session)
            .send()
            .await
            .map_err(|e| PaymentError::Http(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(PaymentError::Http(format!(
                "session create returned HTTP {}",
                resp.status()
            )));
        }
        let created: SessionCreated = resp
            .json()
            .await
            .map_err(|e| PaymentError::BadResponse(e.to_string()))?;

        info!(
            session_id = %created.id,
            amount = session.amount,
            currency = %session.currency,
            "payment session opened"
        );

        let (tx, rx) = oneshot::channel();
        let poller = self.clone();
        tokio::spawn(async move {
            let outcome = poller.poll_session(&created.id).await;
            // Receiver may be gone if the caller gave up; nothing to do then
            let _ = tx.send(outcome);
        });
        Ok(rx)
    }
}
