//! Checkout Workflow
//!
//! Drives a cart through payment to a placed order:
//!
//! ```text
//! cart snapshot ── validate ──> payment session ── outcome ──> place order ──> redirect
//!                     │                              │                │
//!                 EmptyCart /                   Cancelled /      OrderRejected /
//!                 NoAddress                     Failed           StoreFailed
//! ```
//!
//! # Contract
//!
//! 1. **Ordered preconditions**: empty cart is reported before a missing
//!    address; neither touches the payment provider.
//! 2. **At-most-once order**: `place_order` is reachable only from the
//!    completed-payment arm. A rejected or failed submission is terminal for
//!    the attempt; there is no retry and no compensation of the payment.
//! 3. **Selections persist**: the delivery address survives failed attempts,
//!    so only the missing piece needs fixing before the user tries again.

pub mod address;
pub mod cart;
pub mod error;
pub mod feedback;
pub mod order;
pub mod workflow;

// Re-exports for convenience
pub use address::{AddressBook, AddressSelection};
pub use cart::{CartLineItem, CartSnapshot, CartSource, MemoryCartStore};
pub use error::CheckoutError;
pub use feedback::{
    Navigator, Notifier, RecordingNavigator, RecordingNotifier, Toast, ToastVariant,
    TracingNavigator, TracingNotifier,
};
pub use order::{OrderLineItem, OrderRequest, OrderRequestId, OrderStatus, PaymentStatus};
pub use workflow::{CheckoutReceipt, CheckoutSettings, CheckoutWorkflow};
