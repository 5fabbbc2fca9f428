//! Shared gateway state.

use std::sync::Arc;

use crate::auth::AuthService;
use crate::checkout::{AddressBook, CheckoutWorkflow, MemoryCartStore};
use crate::config::AppConfig;
use crate::media::MediaHost;
use crate::orders::OrderStore;

/// Everything the handlers need. Stored behind one Arc; cheap to clone into
/// middleware and spawned tasks.
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub workflow: Arc<CheckoutWorkflow>,
    /// Stand-in for the storefront's cart service; mock endpoints seed it
    pub carts: Arc<MemoryCartStore>,
    pub addresses: Arc<AddressBook>,
    pub orders: Arc<dyn OrderStore>,
    pub media_host: Arc<dyn MediaHost>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: Arc<AppConfig>,
        workflow: Arc<CheckoutWorkflow>,
        carts: Arc<MemoryCartStore>,
        addresses: Arc<AddressBook>,
        orders: Arc<dyn OrderStore>,
        media_host: Arc<dyn MediaHost>,
        auth: Arc<AuthService>,
    ) -> Self {
        Self {
            config,
            workflow,
            carts,
            addresses,
            orders,
            media_host,
            auth,
        }
    }
}
