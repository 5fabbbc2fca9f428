//! Checkout endpoints: address selection and the checkout flow itself.

use std::sync::Arc;

use axum::{Extension, Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::Claims;
use crate::checkout::{AddressSelection, CartSource, CheckoutReceipt};

use super::super::state::AppState;
use super::super::types::{ApiResponse, error_codes};
use super::helpers::{ApiError, api_error, map_checkout_error};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SelectAddressRequest {
    #[validate(length(min = 1, max = 64))]
    pub address_id: String,
    #[validate(length(min = 1, max = 256))]
    pub address: String,
    #[validate(length(min = 1, max = 128))]
    pub city: String,
    #[validate(length(min = 4, max = 10))]
    pub pincode: String,
    #[validate(length(min = 7, max = 15))]
    pub phone: String,
    #[serde(default)]
    #[validate(length(max = 512))]
    pub notes: String,
}

/// Select the delivery address for subsequent checkouts
///
/// The selection persists server-side until replaced, including across
/// failed checkout attempts.
#[utoipa::path(
    post,
    path = "/api/shop/checkout/address",
    request_body = SelectAddressRequest,
    responses(
        (status = 200, description = "Address selected", body = AddressSelection, content_type = "application/json"),
        (status = 400, description = "Validation failure"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_jwt" = [])),
    tag = "Checkout"
)]
pub async fn select_address(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SelectAddressRequest>,
) -> Result<Json<ApiResponse<AddressSelection>>, ApiError> {
    req.validate().map_err(|e| {
        api_error(
            StatusCode::BAD_REQUEST,
            error_codes::INVALID_PARAMETER,
            e.to_string(),
        )
    })?;

    let selection = AddressSelection {
        address_id: req.address_id,
        address: req.address,
        city: req.city,
        pincode: req.pincode,
        phone: req.phone,
        notes: req.notes,
    };

    info!(
        user_id = claims.user_id(),
        address_id = %selection.address_id,
        "address selected"
    );
    state.addresses.select(claims.user_id(), selection.clone());
    Ok(Json(ApiResponse::success(selection)))
}

/// Currently selected delivery address
#[utoipa::path(
    get,
    path = "/api/shop/checkout/address",
    responses(
        (status = 200, description = "Active selection", body = AddressSelection, content_type = "application/json"),
        (status = 404, description = "Nothing selected yet"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_jwt" = [])),
    tag = "Checkout"
)]
pub async fn get_selected_address(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<AddressSelection>>, ApiError> {
    match state.addresses.selected(claims.user_id()) {
        Some(selection) => Ok(Json(ApiResponse::success(selection))),
        None => Err(api_error(
            StatusCode::NOT_FOUND,
            error_codes::NOT_FOUND,
            "No address selected",
        )),
    }
}

/// Run the checkout workflow for the authenticated user
///
/// Reads the current cart and address selection, opens a payment session,
/// waits for its outcome, and places the order on completion. The cart is
/// cleared only after a fully successful attempt.
#[utoipa::path(
    post,
    path = "/api/shop/checkout",
    responses(
        (status = 200, description = "Order placed", body = CheckoutReceipt, content_type = "application/json"),
        (status = 400, description = "Empty cart or no address selected"),
        (status = 402, description = "Payment cancelled or failed"),
        (status = 422, description = "Order rejected by the store"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_jwt" = [])),
    tag = "Checkout"
)]
pub async fn checkout(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<CheckoutReceipt>>, ApiError> {
    let user_id = claims.user_id();
    let cart = state.carts.snapshot(user_id);
    let address = state.addresses.selected(user_id);

    let receipt = state
        .workflow
        .initiate_payment(&claims, cart, address)
        .await
        .map_err(|e| map_checkout_error(&e))?;

    // The attempt is settled; the next checkout starts from a fresh cart
    state.carts.clear(user_id);

    Ok(Json(ApiResponse::success(receipt)))
}
