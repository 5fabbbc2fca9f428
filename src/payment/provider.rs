//! Payment provider seam.
//!
//! The hosted widget's completion/dismiss callbacks are modelled as a
//! oneshot channel: `open` returns a receiver that resolves exactly once
//! with the session outcome. Callers that drop the receiver simply never
//! observe the outcome; nothing blocks on their side.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::oneshot;

use super::error::PaymentError;
use super::types::{PaymentOutcome, PaymentSession};

#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Fetch the provider's client SDK. Mirrors the storefront's dynamic
    /// script load: no session may be opened until this has succeeded for
    /// the attempt at hand.
    async fn load_sdk(&self) -> Result<(), PaymentError>;

    /// Open a hosted payment session. The returned receiver resolves exactly
    /// once with the payer's outcome; a dropped sender counts as a failure.
    async fn open(
        &self,
        session: PaymentSession,
    ) -> Result<oneshot::Receiver<PaymentOutcome>, PaymentError>;
}

/// What the mock resolves a session with.
enum MockResolution {
    Outcome(PaymentOutcome),
    /// Drop the sender without resolving, as a crashed provider would.
    DropChannel,
}

/// Scripted provider for tests and local development. Records every session
/// it opens and resolves the outcome immediately.
pub struct MockProvider {
    resolution: MockResolution,
    sdk_error: Option<String>,
    sdk_loads: AtomicUsize,
    sessions: Mutex<Vec<PaymentSession>>,
}

impl MockProvider {
    fn with_resolution(resolution: MockResolution) -> Self {
        Self {
            resolution,
            sdk_error: None,
            sdk_loads: AtomicUsize::new(0),
            sessions: Mutex::new(Vec::new()),
        }
    }

    /// Every session completes with the given payment id.
    pub fn completing(payment_id: &str) -> Self {
        Self::with_resolution(MockResolution::Outcome(PaymentOutcome::Completed {
            payment_id: payment_id.to_string(),
        }))
    }

    /// Every session is dismissed by the payer.
    pub fn cancelling() -> Self {
        Self::with_resolution(MockResolution::Outcome(PaymentOutcome::Cancelled))
    }

    /// Every session fails with the given reason.
    pub fn failing(reason: &str) -> Self {
        Self::with_resolution(MockResolution::Outcome(PaymentOutcome::Failed(
            reason.to_string(),
        )))
    }

    /// Every session's outcome channel is dropped unresolved.
    pub fn dropping() -> Self {
        Self::with_resolution(MockResolution::DropChannel)
    }

    /// SDK loads fail with the given reason; no session can be opened.
    pub fn with_sdk_error(reason: &str) -> Self {
        let mut mock = Self::cancelling();
        mock.sdk_error = Some(reason.to_string());
        mock
    }

    /// Number of SDK load attempts observed.
    pub fn sdk_loads(&self) -> usize {
        self.sdk_loads.load(Ordering::SeqCst)
    }

    pub fn opened_sessions(&self) -> Vec<PaymentSession> {
        self.sessions.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentProvider for MockProvider {
    async fn load_sdk(&self) -> Result<(), PaymentError> {
        self.sdk_loads.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = &self.sdk_error {
            return Err(PaymentError::SdkLoad(reason.clone()));
        }
        Ok(())
    }

    async fn open(
        &self,
        session: PaymentSession,
    ) -> Result<oneshot::Receiver<PaymentOutcome>, PaymentError> {
        self.sessions.lock().unwrap().push(session);
        let (tx, rx) = oneshot::channel();
        match &self.resolution {
            MockResolution::Outcome(outcome) => {
                let _ = tx.send(outcome.clone());
            }
            MockResolution::DropChannel => drop(tx),
        }
        Ok(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payment::types::{PaymentPrefill, PaymentTheme};

    fn session() -> PaymentSession {
        PaymentSession {
            key: "rzp_test_key".to_string(),
            amount: 21000,
            currency: "INR".to_string(),
            name: "Demo Shop".to_string(),
            description: "Storefront order".to_string(),
            image: "/logo.png".to_string(),
            prefill: PaymentPrefill {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                contact: "9999999999".to_string(),
            },
            theme: PaymentTheme {
                color: "#3399cc".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_mock_resolves_once_with_outcome() {
        let mock = MockProvider::completing("pay_123");
        mock.load_sdk().await.unwrap();
        let rx = mock.open(session()).await.unwrap();
        assert_eq!(
            rx.await.unwrap(),
            PaymentOutcome::Completed {
                payment_id: "pay_123".to_string()
            }
        );
        assert_eq!(mock.sdk_loads(), 1);
        assert_eq!(mock.opened_sessions().len(), 1);
        assert_eq!(mock.opened_sessions()[0].amount, 21000);
    }

    #[tokio::test]
    async fn test_mock_sdk_error_blocks_load() {
        let mock = MockProvider::with_sdk_error("network unreachable");
        let err = mock.load_sdk().await.unwrap_err();
        assert!(matches!(err, PaymentError::SdkLoad(_)));
    }

    #[tokio::test]
    async fn test_dropped_channel_surfaces_as_recv_error() {
        let mock = MockProvider::dropping();
        let rx = mock.open(session()).await.unwrap();
        assert!(rx.await.is_err());
    }
}
