//! OpenAPI / Swagger UI Documentation
//!
//! Auto-generated OpenAPI 3.0 documentation for the Shopfront checkout API.
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

// Import handler types for schema registration
use crate::checkout::{AddressSelection, CartLineItem, CartSnapshot, CheckoutReceipt};
use crate::checkout::{OrderStatus, PaymentStatus};
use crate::gateway::handlers::cart::CartView;
use crate::gateway::handlers::checkout::SelectAddressRequest;
use crate::gateway::handlers::health::HealthResponse;
use crate::orders::PersistedOrder;

/// Bearer JWT authentication security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_jwt",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Storefront session token. Obtain one from the auth \
                             service (or /internal/mock/token in dev builds) and \
                             send it as `Authorization: Bearer <token>`.",
                        ))
                        .build(),
                ),
            );
        }
    }
}

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shopfront Checkout API",
        version = "1.0.0",
        description = "Storefront checkout service: cart review, address selection, hosted payment and order placement.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::health_check,
        crate::gateway::handlers::cart::get_cart,
        crate::gateway::handlers::checkout::select_address,
        crate::gateway::handlers::checkout::get_selected_address,
        crate::gateway::handlers::checkout::checkout,
        crate::gateway::handlers::orders::get_orders,
    ),
    components(
        schemas(
            HealthResponse,
            CartView,
            CartLineItem,
            CartSnapshot,
            AddressSelection,
            SelectAddressRequest,
            CheckoutReceipt,
            PersistedOrder,
            OrderStatus,
            PaymentStatus,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Cart", description = "Cart review (auth required)"),
        (name = "Checkout", description = "Address selection and payment flow (auth required)"),
        (name = "Orders", description = "Order history (auth required)"),
        (name = "System", description = "Health checks and system info")
    )
)]
pub struct ApiDoc;
