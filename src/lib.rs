//! Shopfront - Storefront Checkout Service
//!
//! HTTP gateway driving carts through payment to placed orders, plus a
//! media upload pass-through for the admin panel.
//!
//! # Modules
//!
//! - [`checkout`] - Cart validation, address selection, the checkout workflow
//! - [`payment`] - Hosted payment provider client and session types
//! - [`orders`] - Order persistence (PostgreSQL or in-memory)
//! - [`media`] - Media host upload gateway
//! - [`auth`] - JWT verification and the bearer-token middleware
//! - [`gateway`] - Axum router, handlers and OpenAPI docs
//! - [`config`] - YAML-backed runtime configuration
//! - [`logging`] - tracing subscriber setup

pub mod auth;
pub mod checkout;
pub mod config;
pub mod gateway;
pub mod logging;
pub mod media;
pub mod orders;
pub mod payment;

// Convenient re-exports at crate root
pub use checkout::{
    AddressSelection, CartLineItem, CartSnapshot, CheckoutError, CheckoutReceipt,
    CheckoutWorkflow, OrderRequest, OrderRequestId,
};
pub use orders::{CreateOrderResult, OrderStore, PersistedOrder};
pub use payment::{PaymentOutcome, PaymentProvider, PaymentSession};
