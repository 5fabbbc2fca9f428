//! Order history endpoint.

use std::sync::Arc;

use axum::{Extension, Json, extract::State, http::StatusCode};
use tracing::error;

use crate::auth::Claims;
use crate::orders::PersistedOrder;

use super::super::state::AppState;
use super::super::types::{ApiResponse, error_codes};
use super::helpers::{ApiError, api_error};

/// Recent orders for the authenticated user, newest first
#[utoipa::path(
    get,
    path = "/api/shop/orders",
    responses(
        (status = 200, description = "Order history", body = [PersistedOrder], content_type = "application/json"),
        (status = 401, description = "Missing or invalid token"),
        (status = 503, description = "Order store unavailable")
    ),
    security(("bearer_jwt" = [])),
    tag = "Orders"
)]
pub async fn get_orders(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<Vec<PersistedOrder>>>, ApiError> {
    match state.orders.orders_for_user(claims.user_id()).await {
        Ok(orders) => Ok(Json(ApiResponse::success(orders))),
        Err(e) => {
            error!(user_id = claims.user_id(), error = %e, "order history query failed");
            Err(api_error(
                StatusCode::SERVICE_UNAVAILABLE,
                error_codes::SERVICE_UNAVAILABLE,
                "Order store unavailable",
            ))
        }
    }
}
