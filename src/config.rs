//! Application configuration
//!
//! All deployment-specific values live in `config/{env}.yaml`. Credentials for
//! the payment provider and the media host are never compiled into the binary;
//! they are read here at startup and injected into the collaborators that need
//! them.

use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    /// Log level: trace, debug, info, warn, error
    pub log_level: String,
    /// Log directory
    pub log_dir: String,
    /// Log file name prefix
    pub log_file: String,
    /// Use JSON format for logs
    pub use_json: bool,
    /// Log rotation: hourly, daily, never
    pub rotation: String,
    /// Keep outbound HTTP client logs at their configured level.
    /// When false, hyper/reqwest chatter is capped at warn.
    pub verbose_http: bool,

    pub gateway: GatewayConfig,

    #[serde(default)]
    pub checkout: CheckoutConfig,

    pub payment: PaymentConfig,

    pub media: MediaConfig,

    /// HS256 secret for verifying bearer tokens minted by the auth service
    pub jwt_secret: String,

    /// PostgreSQL connection URL for order persistence.
    /// Orders fall back to the in-memory store when absent.
    #[serde(default)]
    pub postgres_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Knobs of the checkout flow itself. The defaults mirror the storefront
/// deployment this service was extracted from.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CheckoutConfig {
    /// ISO currency code sent to the payment provider
    pub currency: String,
    /// Payment method label recorded on every order
    pub payment_method: String,
    /// Client route to redirect to after a placed order
    pub redirect_route: String,
    /// Delay before the post-order redirect fires, in milliseconds
    pub redirect_delay_ms: u64,
    /// Placeholder contact number for the payment prefill block.
    /// The storefront does not collect phone numbers at signup.
    pub prefill_contact: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            currency: "INR".to_string(),
            payment_method: "razorpay".to_string(),
            redirect_route: "/shop/account".to_string(),
            redirect_delay_ms: 1500,
            prefill_contact: "9999999999".to_string(),
        }
    }
}

/// Hosted payment provider settings. `key_id` is the publishable key that the
/// provider expects inside the session options; the account secret never
/// enters this service.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PaymentConfig {
    pub key_id: String,
    /// Client script URL probed before any session is opened
    pub script_url: String,
    /// Base URL of the provider's session API
    pub api_base: String,
    /// Merchant display name shown in the payment UI
    pub display_name: String,
    /// One-line description shown in the payment UI
    pub description: String,
    /// Merchant logo URL shown in the payment UI
    pub image_url: String,
    /// Payment UI accent color
    pub theme_color: String,
    /// Session status poll interval, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Give up waiting for a session outcome after this long, in milliseconds
    #[serde(default = "default_session_timeout_ms")]
    pub session_timeout_ms: u64,
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_session_timeout_ms() -> u64 {
    300_000
}

/// Media host (Cloudinary-style) credentials and endpoint.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MediaConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Upload API base, e.g. https://api.cloudinary.com/v1_1
    pub upload_base: String,
}

impl AppConfig {
    /// Load configuration from config/{env}.yaml
    pub fn load(env: &str) -> Self {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .unwrap_or_else(|e| panic!("Failed to read config file {}: {}", config_path, e));
        serde_yaml::from_str(&content)
            .unwrap_or_else(|e| panic!("Failed to parse config file {}: {}", config_path, e))
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.gateway.host, self.gateway.port)
    }
}
