//! Order record construction.
//!
//! An [`OrderRequest`] is built exactly once per completed payment and never
//! mutated afterwards; whatever the order store does with it, the request
//! itself is immutable.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;
use utoipa::ToSchema;
use uuid::Uuid;

use super::address::AddressSelection;
use super::cart::CartSnapshot;

/// Order request id. ULID keeps ids lexicographically sortable by creation
/// time, which the order history view relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderRequestId(Ulid);

impl OrderRequestId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for OrderRequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrderRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrderRequestId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Ulid::from_str(s)?))
    }
}

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    InProcess,
    InShipping,
    Delivered,
    Rejected,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::InProcess => "inProcess",
            OrderStatus::InShipping => "inShipping",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "confirmed" => Some(OrderStatus::Confirmed),
            "inProcess" => Some(OrderStatus::InProcess),
            "inShipping" => Some(OrderStatus::InShipping),
            "delivered" => Some(OrderStatus::Delivered),
            "rejected" => Some(OrderStatus::Rejected),
            _ => None,
        }
    }
}

/// Settlement status of the payment attached to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(PaymentStatus::Pending),
            "paid" => Some(PaymentStatus::Paid),
            "failed" => Some(PaymentStatus::Failed),
            _ => None,
        }
    }
}

/// Cart line flattened into the order. The price recorded here is the
/// effective unit price resolved at build time; the list/sale distinction
/// does not survive into the order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderLineItem {
    pub product_id: String,
    pub title: String,
    pub image: String,
    /// Effective unit price at checkout time
    pub price: Decimal,
    pub quantity: u32,
}

/// The immutable record of one checkout attempt, submitted to the order
/// store after payment completes.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub order_id: OrderRequestId,
    pub user_id: i64,
    pub cart_id: Uuid,
    pub line_items: Vec<OrderLineItem>,
    pub address_info: AddressSelection,
    pub order_status: OrderStatus,
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    /// Equals the sum over line_items of price * quantity
    pub total_amount: Decimal,
    pub order_date: DateTime<Utc>,
    pub last_update: DateTime<Utc>,
}

impl OrderRequest {
    /// Build an order from a cart snapshot and the active address selection.
    /// Both timestamps are set to now; statuses start at pending.
    pub fn build(
        user_id: i64,
        cart: &CartSnapshot,
        address: &AddressSelection,
        payment_method: &str,
    ) -> Self {
        let line_items = cart
            .items
            .iter()
            .map(|item| OrderLineItem {
                product_id: item.product_id.clone(),
                title: item.title.clone(),
                image: item.image.clone(),
                price: item.effective_unit_price(),
                quantity: item.quantity,
            })
            .collect();

        let now = Utc::now();
        Self {
            order_id: OrderRequestId::new(),
            user_id,
            cart_id: cart.cart_id,
            line_items,
            address_info: address.clone(),
            order_status: OrderStatus::Pending,
            payment_method: payment_method.to_string(),
            payment_status: PaymentStatus::Pending,
            total_amount: cart.total_amount(),
            order_date: now,
            last_update: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::cart::CartLineItem;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn sample_cart() -> CartSnapshot {
        CartSnapshot::new(
            Uuid::new_v4(),
            vec![
                CartLineItem {
                    product_id: "shoe-42".to_string(),
                    title: "Running Shoe".to_string(),
                    image: "/img/shoe.png".to_string(),
                    price: d("100.00"),
                    sale_price: d("80.00"),
                    quantity: 2,
                },
                CartLineItem {
                    product_id: "cap-7".to_string(),
                    title: "Cap".to_string(),
                    image: "/img/cap.png".to_string(),
                    price: d("50.00"),
                    sale_price: d("0"),
                    quantity: 1,
                },
            ],
        )
    }

    fn sample_address() -> AddressSelection {
        AddressSelection {
            address_id: "addr-1".to_string(),
            address: "12 MG Road".to_string(),
            city: "Bengaluru".to_string(),
            pincode: "560001".to_string(),
            phone: "9876543210".to_string(),
            notes: "Ring twice".to_string(),
        }
    }

    #[test]
    fn test_build_flattens_effective_prices() {
        let order = OrderRequest::build(42, &sample_cart(), &sample_address(), "razorpay");
        assert_eq!(order.line_items[0].price, d("80.00"));
        assert_eq!(order.line_items[1].price, d("50.00"));
    }

    #[test]
    fn test_build_total_matches_line_items() {
        let order = OrderRequest::build(42, &sample_cart(), &sample_address(), "razorpay");
        let recomputed: Decimal = order
            .line_items
            .iter()
            .map(|li| li.price * Decimal::from(li.quantity))
            .sum();
        assert_eq!(order.total_amount, recomputed);
        assert_eq!(order.total_amount, d("210.00"));
    }

    #[test]
    fn test_build_starts_pending() {
        let order = OrderRequest::build(42, &sample_cart(), &sample_address(), "razorpay");
        assert_eq!(order.order_status, OrderStatus::Pending);
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert_eq!(order.payment_method, "razorpay");
        assert_eq!(order.order_date, order.last_update);
    }

    #[test]
    fn test_order_id_round_trips_as_string() {
        let id = OrderRequestId::new();
        let parsed: OrderRequestId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_status_string_round_trips() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::InProcess,
            OrderStatus::InShipping,
            OrderStatus::Delivered,
            OrderStatus::Rejected,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse("unknown"), None);

        for status in [
            PaymentStatus::Pending,
            PaymentStatus::Paid,
            PaymentStatus::Failed,
        ] {
            assert_eq!(PaymentStatus::parse(status.as_str()), Some(status));
        }
    }
}
