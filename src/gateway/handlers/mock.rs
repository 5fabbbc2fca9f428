//! Development-only seeding endpoints.
//!
//! The storefront's cart service and auth service live upstream; these
//! endpoints stand in for them so the checkout flow can be exercised
//! end to end without either one running.

use std::sync::Arc;

use axum::{Json, extract::State, http::HeaderMap, http::StatusCode};
use serde::Deserialize;

use crate::checkout::{CartLineItem, CartSnapshot};
use uuid::Uuid;

use super::super::state::AppState;
use super::super::types::{ApiResponse, error_codes};
use super::helpers::{ApiError, api_error};

// --- Requests ---

#[derive(Debug, Deserialize)]
pub struct SeedCartRequest {
    pub user_id: i64,
    pub items: Vec<CartLineItem>,
}

#[derive(Debug, Deserialize)]
pub struct MintTokenRequest {
    pub user_id: i64,
    pub name: String,
    pub email: String,
}

// --- Handlers ---

// QA: Internal Auth Check, shared by every mock endpoint.
fn check_internal_secret(headers: &HeaderMap) -> Result<(), ApiError> {
    let secret = headers
        .get("X-Internal-Secret")
        .and_then(|v| v.to_str().ok());
    if secret != Some("dev-secret") {
        return Err(api_error(
            StatusCode::FORBIDDEN,
            error_codes::AUTH_FAILED,
            "Access Denied: Missing or Invalid X-Internal-Secret",
        ));
    }
    Ok(())
}

/// Seed Cart (Debug)
///
/// [SECURITY WARNING] This endpoint is for development/testing ONLY.
/// It writes directly into the in-memory cart store, bypassing the storefront.
///
/// POST /internal/mock/cart
pub async fn seed_cart(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<SeedCartRequest>,
) -> Result<Json<ApiResponse<CartSnapshot>>, ApiError> {
    check_internal_secret(&headers)?;

    let snapshot = CartSnapshot::new(Uuid::new_v4(), req.items);
    state.carts.put(req.user_id, snapshot.clone());
    Ok(Json(ApiResponse::success(snapshot)))
}

/// Mint Token (Debug)
///
/// [SECURITY WARNING] This endpoint is for development/testing ONLY.
/// It mints a valid JWT for any identity without credentials.
///
/// POST /internal/mock/token
pub async fn mint_token(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<MintTokenRequest>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    check_internal_secret(&headers)?;

    match state.auth.issue_token(req.user_id, &req.name, &req.email) {
        Ok(token) => Ok(Json(ApiResponse::success(token))),
        Err(e) => Err(api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            e.to_string(),
        )),
    }
}
