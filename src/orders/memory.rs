//! In-memory order store.
//!
//! The fallback when no PostgreSQL URL is configured, and the double used by
//! workflow tests. The failure knobs arm for exactly one call each, which is
//! enough to exercise every terminal arm of the workflow.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::checkout::order::OrderRequest;

use super::error::OrderStoreError;
use super::store::{CreateOrderResult, OrderStore, PersistedOrder};

pub struct MemoryOrderStore {
    orders: DashMap<String, OrderRequest>,
    fail_next: AtomicBool,
    reject_next: AtomicBool,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self {
            orders: DashMap::new(),
            fail_next: AtomicBool::new(false),
            reject_next: AtomicBool::new(false),
        }
    }

    /// Arm an IO-level failure for the next create call.
    pub fn fail_next_create(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Arm a `success: false` answer for the next create call.
    pub fn reject_next_create(&self) {
        self.reject_next.store(true, Ordering::SeqCst);
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn get(&self, order_id: &str) -> Option<OrderRequest> {
        self.orders.get(order_id).map(|entry| entry.clone())
    }
}

impl Default for MemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn create_order(&self, order: &OrderRequest) -> Result<CreateOrderResult, OrderStoreError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(OrderStoreError::Unavailable("simulated outage".to_string()));
        }
        if self.reject_next.swap(false, Ordering::SeqCst) {
            return Ok(CreateOrderResult::rejected());
        }

        let key = order.order_id.to_string();
        // Duplicate ids are rejected rather than overwritten
        if self.orders.contains_key(&key) {
            return Ok(CreateOrderResult::rejected());
        }
        self.orders.insert(key, order.clone());
        Ok(CreateOrderResult::accepted(order))
    }

    async fn orders_for_user(&self, user_id: i64) -> Result<Vec<PersistedOrder>, OrderStoreError> {
        let mut orders: Vec<PersistedOrder> = self
            .orders
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| PersistedOrder::from_request(&entry))
            .collect();
        orders.sort_by(|a, b| b.order_date.cmp(&a.order_date));
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::address::AddressSelection;
    use crate::checkout::cart::{CartLineItem, CartSnapshot};
    use uuid::Uuid;

    fn sample_order(user_id: i64) -> OrderRequest {
        let cart = CartSnapshot::new(
            Uuid::new_v4(),
            vec![CartLineItem {
                product_id: "p1".to_string(),
                title: "Widget".to_string(),
                image: "/img/widget.png".to_string(),
                price: "25.00".parse().unwrap(),
                sale_price: "0".parse().unwrap(),
                quantity: 2,
            }],
        );
        let address = AddressSelection {
            address_id: "a1".to_string(),
            address: "5 High Street".to_string(),
            city: "Pune".to_string(),
            pincode: "411001".to_string(),
            phone: "9000000001".to_string(),
            notes: String::new(),
        };
        OrderRequest::build(user_id, &cart, &address, "razorpay")
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let store = MemoryOrderStore::new();
        let order = sample_order(11);

        let result = store.create_order(&order).await.unwrap();
        assert!(result.success);
        let payload = result.payload.unwrap();
        assert_eq!(payload.order_id, order.order_id.to_string());

        let listed = store.orders_for_user(11).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].total_amount, "50.00".parse().unwrap());

        assert!(store.orders_for_user(12).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fail_knob_arms_once() {
        let store = MemoryOrderStore::new();
        store.fail_next_create();

        let err = store.create_order(&sample_order(1)).await.unwrap_err();
        assert!(matches!(err, OrderStoreError::Unavailable(_)));
        assert_eq!(store.order_count(), 0);

        // Next call goes through
        assert!(store.create_order(&sample_order(1)).await.unwrap().success);
        assert_eq!(store.order_count(), 1);
    }

    #[tokio::test]
    async fn test_reject_knob_returns_unsuccessful_result() {
        let store = MemoryOrderStore::new();
        store.reject_next_create();

        let result = store.create_order(&sample_order(1)).await.unwrap();
        assert!(!result.success);
        assert!(result.payload.is_none());
        assert_eq!(store.order_count(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_order_id_rejected() {
        let store = MemoryOrderStore::new();
        let order = sample_order(1);
        assert!(store.create_order(&order).await.unwrap().success);
        assert!(!store.create_order(&order).await.unwrap().success);
        assert_eq!(store.order_count(), 1);
    }

    #[tokio::test]
    async fn test_listing_is_newest_first() {
        let store = MemoryOrderStore::new();
        let first = sample_order(3);
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let second = sample_order(3);

        store.create_order(&first).await.unwrap();
        store.create_order(&second).await.unwrap();

        let listed = store.orders_for_user(3).await.unwrap();
        assert_eq!(listed[0].order_id, second.order_id.to_string());
        assert_eq!(listed[1].order_id, first.order_id.to_string());
    }
}
