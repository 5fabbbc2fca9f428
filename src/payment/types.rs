//! Payment session types shared by all provider implementations.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

/// Payer details prefilled into the hosted payment UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentPrefill {
    pub name: String,
    pub email: String,
    /// Placeholder contact number from config; the storefront does not
    /// collect phone numbers at signup
    pub contact: String,
}

/// Visual hints for the hosted payment UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentTheme {
    pub color: String,
}

/// The options bag handed to the provider when opening a session. Field
/// names follow the provider's wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentSession {
    /// Publishable key id from config
    pub key: String,
    /// Amount in currency minor units (major amount times 100)
    pub amount: u64,
    pub currency: String,
    /// Merchant display name
    pub name: String,
    pub description: String,
    /// Merchant logo URL
    pub image: String,
    pub prefill: PaymentPrefill,
    pub theme: PaymentTheme,
}

/// Outcome of one hosted payment session. Delivered exactly once per
/// session, through a oneshot channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// The payer confirmed; carries the provider's payment id.
    Completed { payment_id: String },
    /// The payer dismissed the payment UI without paying.
    Cancelled,
    /// The provider reported a failure distinct from a dismissal.
    Failed(String),
}

/// Convert a major-unit decimal amount into integral minor units (x100).
/// Returns None when the scaled amount is negative, fractional, or does not
/// fit in u64.
pub fn to_minor_units(amount: Decimal) -> Option<u64> {
    amount
        .checked_mul(Decimal::from(100u32))
        .filter(|scaled| scaled.fract().is_zero())
        .and_then(|scaled| scaled.to_u64())
}
