//! Shared handler plumbing: the error response shape and the checkout
//! error mapping.

use axum::{Json, http::StatusCode};

use crate::checkout::CheckoutError;

use super::super::types::{ApiResponse, error_codes};

pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

pub fn api_error(status: StatusCode, code: i32, msg: impl Into<String>) -> ApiError {
    (status, Json(ApiResponse::error(code, msg)))
}

/// Map workflow errors onto HTTP status + taxonomy code. The message is the
/// error's own Display text.
pub fn map_checkout_error(e: &CheckoutError) -> ApiError {
    let (status, code) = match e {
        CheckoutError::EmptyCart => (StatusCode::BAD_REQUEST, error_codes::EMPTY_CART),
        CheckoutError::NoAddressSelected => {
            (StatusCode::BAD_REQUEST, error_codes::NO_ADDRESS_SELECTED)
        }
        CheckoutError::AmountNotRepresentable(_) => {
            (StatusCode::BAD_REQUEST, error_codes::INVALID_AMOUNT)
        }
        CheckoutError::SdkUnavailable(_) => {
            (StatusCode::BAD_GATEWAY, error_codes::PAYMENT_SDK_UNAVAILABLE)
        }
        CheckoutError::PaymentCancelled => {
            (StatusCode::PAYMENT_REQUIRED, error_codes::PAYMENT_CANCELLED)
        }
        CheckoutError::PaymentFailed(_) => {
            (StatusCode::PAYMENT_REQUIRED, error_codes::PAYMENT_FAILED)
        }
        CheckoutError::OrderRejected => {
            (StatusCode::UNPROCESSABLE_ENTITY, error_codes::ORDER_REJECTED)
        }
        CheckoutError::StoreFailed(_) => {
            (StatusCode::SERVICE_UNAVAILABLE, error_codes::SERVICE_UNAVAILABLE)
        }
    };
    api_error(status, code, e.to_string())
}
