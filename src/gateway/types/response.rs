//! Unified API response envelope.
//!
//! Every endpoint answers `{code, msg, data}`: code 0 on success, a stable
//! taxonomy code otherwise, `data` present only when there is a payload.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// 0 = success, otherwise an [`error_codes`] value
    pub code: i32,
    /// "success" or a human-readable error message
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: error_codes::SUCCESS,
            msg: "success".to_string(),
            data: Some(data),
        }
    }

    pub fn error(code: i32, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

/// Stable error codes for storefront clients. Codes are part of the API
/// contract; add, never renumber.
pub mod error_codes {
    /// Success
    pub const SUCCESS: i32 = 0;

    // === Validation (1xxx) ===
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const EMPTY_CART: i32 = 1002;
    pub const NO_ADDRESS_SELECTED: i32 = 1003;
    pub const INVALID_AMOUNT: i32 = 1004;

    // === Authentication (2xxx) ===
    pub const MISSING_AUTH: i32 = 2001;
    pub const AUTH_FAILED: i32 = 2002;

    // === Payment (3xxx) ===
    pub const PAYMENT_SDK_UNAVAILABLE: i32 = 3001;
    pub const PAYMENT_CANCELLED: i32 = 3002;
    pub const PAYMENT_FAILED: i32 = 3003;

    // === Orders (4xxx) ===
    pub const ORDER_REJECTED: i32 = 4001;
    pub const NOT_FOUND: i32 = 4004;

    // === Media (45xx) ===
    pub const UPLOAD_FAILED: i32 = 4501;

    // === Server (5xxx) ===
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SERVICE_UNAVAILABLE: i32 = 5001;
}
