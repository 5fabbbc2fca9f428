//! Cart view endpoint.

use std::sync::Arc;

use axum::{Extension, Json, extract::State};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::Claims;
use crate::checkout::{CartLineItem, CartSource};

use super::super::state::AppState;
use super::super::types::ApiResponse;

/// Cart contents plus the computed total, as the checkout page renders it.
#[derive(Debug, Serialize, ToSchema)]
pub struct CartView {
    /// None when the user has no cart yet
    pub cart_id: Option<Uuid>,
    pub items: Vec<CartLineItem>,
    pub total_amount: Decimal,
}

/// Current cart for the authenticated user
///
/// A missing cart renders as an empty one; this endpoint never 404s.
#[utoipa::path(
    get,
    path = "/api/shop/cart",
    responses(
        (status = 200, description = "Cart contents with total", body = CartView, content_type = "application/json"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_jwt" = [])),
    tag = "Cart"
)]
pub async fn get_cart(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Json<ApiResponse<CartView>> {
    let view = match state.carts.snapshot(claims.user_id()) {
        Some(snapshot) => CartView {
            cart_id: Some(snapshot.cart_id),
            total_amount: snapshot.total_amount(),
            items: snapshot.items,
        },
        None => CartView {
            cart_id: None,
            items: Vec::new(),
            total_amount: Decimal::ZERO,
        },
    };
    Json(ApiResponse::success(view))
}
