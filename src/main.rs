//! Shopfront - Storefront Checkout Service
//!
//! Entry point. Architecture:
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌───────────┐    ┌──────────┐
//! │  Config  │───▶│ Gateway  │───▶│ Checkout  │───▶│  Orders  │
//! │  (YAML)  │    │ (axum)   │    │ Workflow  │    │ (PG/mem) │
//! └──────────┘    └──────────┘    └───────────┘    └──────────┘
//!
//! The gateway also fronts the payment provider (hosted sessions) and
//! the media host (admin uploads).
//! ```

use shopfront::config::AppConfig;
use shopfront::gateway;
use shopfront::logging;

// ============================================================
// ARGUMENTS
// ============================================================

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    std::env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string())
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

// ============================================================
// MAIN
// ============================================================

#[tokio::main]
async fn main() {
    let env = get_env();
    let mut app_config = AppConfig::load(&env);
    let _log_guard = logging::init_logging(&app_config);

    if let Some(port) = get_port_override() {
        app_config.gateway.port = port;
    }

    tracing::info!(
        env = %env,
        version = env!("CARGO_PKG_VERSION"),
        build = env!("GIT_HASH"),
        "Starting Shopfront gateway"
    );
    println!("🛍️  Shopfront Checkout Service ({})", env);

    gateway::run_server(app_config).await;
}
