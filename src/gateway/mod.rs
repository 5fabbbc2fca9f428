pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::{AuthService, jwt_auth_middleware};
use crate::checkout::{
    AddressBook, CheckoutSettings, CheckoutWorkflow, MemoryCartStore, TracingNavigator,
    TracingNotifier,
};
use crate::config::AppConfig;
use crate::media::HttpMediaHost;
use crate::orders::{MemoryOrderStore, OrderStore, PgOrderStore};
use crate::payment::HostedCheckout;
use state::AppState;

/// Start HTTP Gateway server
pub async fn run_server(config: AppConfig) {
    let config = Arc::new(config);

    let auth = Arc::new(AuthService::new(config.jwt_secret.clone()));

    // External collaborators, both plain HTTP clients
    let payment = Arc::new(HostedCheckout::new(config.payment.clone()));
    let media_host = Arc::new(HttpMediaHost::new(config.media.clone()));

    // ==========================================================================
    // Order store: PostgreSQL when configured, in-memory otherwise
    // ==========================================================================
    let orders: Arc<dyn OrderStore> = match config.postgres_url.as_deref() {
        Some(url) => match PgOrderStore::connect(url).await {
            Ok(store) => {
                println!("🗄️  PostgreSQL order store connected");
                Arc::new(store)
            }
            Err(e) => {
                println!("⚠️  PostgreSQL unavailable ({}), falling back to in-memory orders", e);
                Arc::new(MemoryOrderStore::new())
            }
        },
        None => {
            println!("⚠️  No postgres_url configured, orders are in-memory only");
            Arc::new(MemoryOrderStore::new())
        }
    };

    let workflow = Arc::new(CheckoutWorkflow::new(
        payment,
        orders.clone(),
        Arc::new(TracingNotifier),
        Arc::new(TracingNavigator),
        CheckoutSettings::from_config(&config),
    ));

    let carts = Arc::new(MemoryCartStore::new());
    let addresses = Arc::new(AddressBook::new());

    // Create shared state
    let state = Arc::new(AppState::new(
        config.clone(),
        workflow,
        carts,
        addresses,
        orders,
        media_host,
        auth,
    ));

    // ==========================================================================
    // Shop Routes - Protected by JWT
    // ==========================================================================
    let shop_routes = Router::new()
        .route("/cart", get(handlers::cart::get_cart))
        .route("/checkout/address", post(handlers::checkout::select_address))
        .route("/checkout/address", get(handlers::checkout::get_selected_address))
        .route("/checkout", post(handlers::checkout::checkout))
        .route("/orders", get(handlers::orders::get_orders))
        .layer(from_fn_with_state(state.clone(), jwt_auth_middleware));

    // ==========================================================================
    // Admin Routes - Protected by JWT
    // ==========================================================================
    let admin_routes = Router::new()
        .route("/media/upload", post(handlers::media::upload_media))
        .layer(from_fn_with_state(state.clone(), jwt_auth_middleware));

    // Build complete router
    let app = Router::new()
        // Health check
        .route("/api/v1/health", get(handlers::health::health_check))
        // API Routes
        .nest("/api/shop", shop_routes)
        .nest("/api/admin", admin_routes);

    // [SECURITY] Mock API routes - only compiled when 'mock-api' feature is enabled.
    // Production builds MUST be compiled with `--no-default-features` to exclude this.
    #[cfg(feature = "mock-api")]
    let app = app.nest(
        "/internal/mock",
        Router::new()
            .route("/cart", post(handlers::mock::seed_cart))
            .route("/token", post(handlers::mock::mint_token)),
    );

    let app = app
        .with_state(state)
        // OpenAPI / Swagger UI (stateless, added after with_state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()));

    // Bind address
    let addr = config.listen_addr();
    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("❌ FATAL: Failed to bind to {}: {}", addr, e);
            eprintln!(
                "   Hint: Port {} may already be in use. Check with: lsof -i :{}",
                config.gateway.port, config.gateway.port
            );
            std::process::exit(1);
        }
    };

    println!("🚀 Gateway listening on http://{}", addr);
    println!("📖 API Docs: http://{}/docs", addr);
    println!("🛒 Shop API:   /api/shop/* (auth required)");
    println!("🖼️  Admin API:  /api/admin/* (auth required)");

    // Start server
    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("❌ FATAL: Server error: {}", e);
        std::process::exit(1);
    }
}
