//! Hosted payment provider integration.
//!
//! The provider runs the actual payment UI; this module only loads its
//! client SDK, opens sessions, and waits for the single-shot outcome.

pub mod error;
pub mod hosted;
pub mod provider;
pub mod types;

// Re-exports for convenience
pub use error::PaymentError;
pub use hosted::HostedCheckout;
pub use provider::{MockProvider, PaymentProvider};
pub use types::{PaymentOutcome, PaymentPrefill, PaymentSession, PaymentTheme, to_minor_units};
