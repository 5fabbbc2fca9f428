//! PostgreSQL order store.
//!
//! One wide row per order: the line items and the address selection go in as
//! JSONB, everything the account view filters or sorts on gets its own
//! column.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::Row;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, warn};

use crate::checkout::order::{OrderRequest, OrderStatus, PaymentStatus};

use super::error::OrderStoreError;
use super::store::{CreateOrderResult, OrderStore, PersistedOrder};

const CREATE_ORDERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS orders_tb (
    order_id        TEXT PRIMARY KEY,
    user_id         BIGINT NOT NULL,
    cart_id         UUID NOT NULL,
    line_items      JSONB NOT NULL,
    address_info    JSONB NOT NULL,
    order_status    TEXT NOT NULL,
    payment_method  TEXT NOT NULL,
    payment_status  TEXT NOT NULL,
    total_amount    NUMERIC(18, 2) NOT NULL,
    order_date      TIMESTAMPTZ NOT NULL,
    last_update     TIMESTAMPTZ NOT NULL
)
"#;

const CREATE_ORDERS_USER_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_orders_tb_user_date
    ON orders_tb (user_id, order_date DESC)
"#;

/// How many orders the account view pages through at once.
const HISTORY_LIMIT: i64 = 50;

pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    /// Connect and bootstrap the schema.
    pub async fn connect(database_url: &str) -> Result<Self, OrderStoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;
        let store = Self { pool };
        store.ensure_schema().await?;
        info!("PostgreSQL order store ready");
        Ok(store)
    }

    /// Reuse an existing pool (tests share one per database).
    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Idempotent schema bootstrap.
    pub async fn ensure_schema(&self) -> Result<(), OrderStoreError> {
        sqlx::query(CREATE_ORDERS_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_ORDERS_USER_INDEX)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), OrderStoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn create_order(&self, order: &OrderRequest) -> Result<CreateOrderResult, OrderStoreError> {
        let line_items = serde_json::to_value(&order.line_items)?;
        let address_info = serde_json::to_value(&order.address_info)?;

        let result = sqlx::query(
            r#"
            INSERT INTO orders_tb
                (order_id, user_id, cart_id, line_items, address_info,
                 order_status, payment_method, payment_status,
                 total_amount, order_date, last_update)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (order_id) DO NOTHING
            "#,
        )
        .bind(order.order_id.to_string())
        .bind(order.user_id)
        .bind(order.cart_id)
        .bind(line_items)
        .bind(address_info)
        .bind(order.order_status.as_str())
        .bind(&order.payment_method)
        .bind(order.payment_status.as_str())
        .bind(order.total_amount)
        .bind(order.order_date)
        .bind(order.last_update)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            warn!(order_id = %order.order_id, "duplicate order id, create rejected");
            return Ok(CreateOrderResult::rejected());
        }
        Ok(CreateOrderResult::accepted(order))
    }

    async fn orders_for_user(&self, user_id: i64) -> Result<Vec<PersistedOrder>, OrderStoreError> {
        let rows = sqlx::query(
            r#"
            SELECT order_id, order_status, payment_status, total_amount, order_date
            FROM orders_tb
            WHERE user_id = $1
            ORDER BY order_date DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(HISTORY_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let order_status_raw: String = row.get("order_status");
                let payment_status_raw: String = row.get("payment_status");
                let order_status = OrderStatus::parse(&order_status_raw)
                    .ok_or_else(|| OrderStoreError::UnknownStatus(order_status_raw.clone()))?;
                let payment_status = PaymentStatus::parse(&payment_status_raw)
                    .ok_or_else(|| OrderStoreError::UnknownStatus(payment_status_raw.clone()))?;
                let total_amount: Decimal = row.get("total_amount");
                let order_date: DateTime<Utc> = row.get("order_date");
                Ok(PersistedOrder {
                    order_id: row.get("order_id"),
                    order_status,
                    payment_status,
                    total_amount,
                    order_date,
                })
            })
            .collect()
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
                price: "100.00".parse().unwrap(),
                sale_price: "80.00".parse().unwrap(),
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

    // Needs a live database; set TEST_DATABASE_URL to run.
    #[tokio::test]
    async fn test_pg_create_and_list() {
        let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
            eprintln!("Skipping test_pg_create_and_list: TEST_DATABASE_URL not set");
            return;
        };
        let store = PgOrderStore::connect(&url).await.unwrap();

        let user_id: i64 = 900_000 + (std::process::id() as i64);
        let order = sample_order(user_id);

        let result = store.create_order(&order).await.unwrap();
        assert!(result.success);

        // Same id again is a rejection, not an error
        let dup = store.create_order(&order).await.unwrap();
        assert!(!dup.success);

        let listed = store.orders_for_user(user_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].order_id, order.order_id.to_string());
        assert_eq!(listed[0].total_amount, "160.00".parse().unwrap());
    }
}
