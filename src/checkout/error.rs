//! Checkout error taxonomy.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::orders::OrderStoreError;

/// Everything that can stop a checkout attempt. Every variant is terminal
/// for the invocation: the caller reports it and the user decides whether
/// to try again.
#[derive(Debug, Error)]
pub enum CheckoutError {
    // === Precondition failures (checked before any external call) ===
    #[error("Cart is empty")]
    EmptyCart,

    #[error("No delivery address selected")]
    NoAddressSelected,

    /// The cart total does not convert to a whole number of minor units.
    #[error("Order total {0} is not representable in minor units")]
    AmountNotRepresentable(Decimal),

    // === Payment provider ===
    #[error("Payment SDK failed to load: {0}")]
    SdkUnavailable(String),

    #[error("Payment cancelled by the payer")]
    PaymentCancelled,

    #[error("Payment failed: {0}")]
    PaymentFailed(String),

    // === Order persistence (only reachable after a completed payment) ===
    /// The store answered, but with `success: false`.
    #[error("Order rejected by the order store")]
    OrderRejected,

    #[error("Order store failure: {0}")]
    StoreFailed(#[from] OrderStoreError),
}
