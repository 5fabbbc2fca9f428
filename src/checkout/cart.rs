//! Cart snapshot and total computation.
//!
//! The cart itself is owned by the storefront; checkout only ever sees a
//! read-only snapshot of it. Totals are computed here, in `Decimal`, and the
//! order built from a snapshot carries exactly this total.

use dashmap::DashMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One line of a shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartLineItem {
    pub product_id: String,
    pub title: String,
    /// Product image URL, carried through to the order record
    pub image: String,
    /// List price per unit
    pub price: Decimal,
    /// Discounted price per unit; effective only when positive
    pub sale_price: Decimal,
    pub quantity: u32,
}

impl CartLineItem {
    /// Sale price when positive, list price otherwise.
    pub fn effective_unit_price(&self) -> Decimal {
        if self.sale_price > Decimal::ZERO {
            self.sale_price
        } else {
            self.price
        }
    }

    pub fn line_total(&self) -> Decimal {
        self.effective_unit_price() * Decimal::from(self.quantity)
    }
}

/// Read-only view of one user's cart at checkout time.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartSnapshot {
    pub cart_id: Uuid,
    pub items: Vec<CartLineItem>,
}

impl CartSnapshot {
    pub fn new(cart_id: Uuid, items: Vec<CartLineItem>) -> Self {
        Self { cart_id, items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of effective unit price times quantity over all lines.
    pub fn total_amount(&self) -> Decimal {
        self.items.iter().map(|item| item.line_total()).sum()
    }
}

/// Read-only accessor for cart contents. Checkout never mutates a cart
/// through this seam.
pub trait CartSource: Send + Sync {
    fn snapshot(&self, user_id: i64) -> Option<CartSnapshot>;
}

/// In-memory cart store, standing in for the storefront's cart service.
/// Mock endpoints seed it; checkout reads it through [`CartSource`].
pub struct MemoryCartStore {
    carts: DashMap<i64, CartSnapshot>,
}

impl MemoryCartStore {
    pub fn new() -> Self {
        Self {
            carts: DashMap::new(),
        }
    }

    /// Replace the user's cart wholesale.
    pub fn put(&self, user_id: i64, snapshot: CartSnapshot) {
        self.carts.insert(user_id, snapshot);
    }

    pub fn clear(&self, user_id: i64) {
        self.carts.remove(&user_id);
    }
}

impl Default for MemoryCartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartSource for MemoryCartStore {
    fn snapshot(&self, user_id: i64) -> Option<CartSnapshot> {
        self.carts.get(&user_id).map(|entry| entry.clone())
    }
}
