//! Storefront API handlers.

pub mod cart;
pub mod checkout;
pub mod health;
pub mod helpers;
pub mod media;
#[cfg(feature = "mock-api")]
pub mod mock;
pub mod orders;
