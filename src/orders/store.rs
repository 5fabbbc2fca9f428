//! Order store seam.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::checkout::order::{OrderRequest, OrderStatus, PaymentStatus};

use super::error::OrderStoreError;

/// Summary of a stored order, as returned to the account view.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PersistedOrder {
    pub order_id: String,
    pub order_status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub total_amount: Decimal,
    pub order_date: DateTime<Utc>,
}

impl PersistedOrder {
    pub fn from_request(order: &OrderRequest) -> Self {
        Self {
            order_id: order.order_id.to_string(),
            order_status: order.order_status,
            payment_status: order.payment_status,
            total_amount: order.total_amount,
            order_date: order.order_date,
        }
    }
}

/// Result object of a create call. The store is trusted to mean what it
/// says: `success: false` with no payload is a rejection, not an error.
#[derive(Debug, Clone)]
pub struct CreateOrderResult {
    pub success: bool,
    pub payload: Option<PersistedOrder>,
}

impl CreateOrderResult {
    pub fn accepted(order: &OrderRequest) -> Self {
        Self {
            success: true,
            payload: Some(PersistedOrder::from_request(order)),
        }
    }

    pub fn rejected() -> Self {
        Self {
            success: false,
            payload: None,
        }
    }
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Submit one order record. Called at most once per checkout attempt;
    /// an `Err` or a rejection is terminal for that attempt.
    async fn create_order(&self, order: &OrderRequest) -> Result<CreateOrderResult, OrderStoreError>;

    /// Most recent orders for one user, newest first.
    async fn orders_for_user(&self, user_id: i64) -> Result<Vec<PersistedOrder>, OrderStoreError>;
}
