//! The checkout workflow.
//!
//! One call to [`CheckoutWorkflow::initiate_payment`] drives a whole
//! attempt: validation, SDK load, payment session, outcome wait, order
//! placement, post-order redirect. Clones of the collaborator handles are
//! cheap; one workflow instance serves every request concurrently.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::auth::Claims;
use crate::config::AppConfig;
use crate::orders::OrderStore;
use crate::payment::{
    PaymentOutcome, PaymentPrefill, PaymentProvider, PaymentSession, PaymentTheme, to_minor_units,
};

use super::address::AddressSelection;
use super::cart::CartSnapshot;
use super::error::CheckoutError;
use super::feedback::{Navigator, Notifier, Toast};
use super::order::OrderRequest;

/// Deployment knobs of the flow, pulled out of [`AppConfig`] once at
/// startup.
#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    pub payment_key: String,
    pub currency: String,
    pub payment_method: String,
    pub display_name: String,
    pub description: String,
    pub image_url: String,
    pub theme_color: String,
    pub prefill_contact: String,
    pub redirect_route: String,
    pub redirect_delay: Duration,
}

impl CheckoutSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            payment_key: config.payment.key_id.clone(),
            currency: config.checkout.currency.clone(),
            payment_method: config.checkout.payment_method.clone(),
            display_name: config.payment.display_name.clone(),
            description: config.payment.description.clone(),
            image_url: config.payment.image_url.clone(),
            theme_color: config.payment.theme_color.clone(),
            prefill_contact: config.checkout.prefill_contact.clone(),
            redirect_route: config.checkout.redirect_route.clone(),
            redirect_delay: Duration::from_millis(config.checkout.redirect_delay_ms),
        }
    }
}

/// Returned to the client after a fully successful checkout.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CheckoutReceipt {
    pub order_id: String,
    /// The provider's payment id for the completed session
    pub payment_id: String,
    pub total_amount: Decimal,
    /// Where the client should navigate once the delay elapses
    pub redirect_route: String,
    pub redirect_delay_ms: u64,
}

pub struct CheckoutWorkflow {
    payment: Arc<dyn PaymentProvider>,
    orders: Arc<dyn OrderStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    settings: CheckoutSettings,
}

impl CheckoutWorkflow {
    pub fn new(
        payment: Arc<dyn PaymentProvider>,
        orders: Arc<dyn OrderStore>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        settings: CheckoutSettings,
    ) -> Self {
        Self {
            payment,
            orders,
            notifier,
            navigator,
            settings,
        }
    }

    pub fn settings(&self) -> &CheckoutSettings {
        &self.settings
    }

    /// Run one checkout attempt for `user` over the given read-only inputs.
    ///
    /// Precondition order is part of the contract: an empty (or missing)
    /// cart is reported before a missing address, and neither touches the
    /// payment provider. A `Cancelled` or `Failed` outcome never reaches the
    /// order store.
    pub async fn initiate_payment(
        &self,
        user: &Claims,
        cart: Option<CartSnapshot>,
        address: Option<AddressSelection>,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        let cart = match cart {
            Some(c) if !c.is_empty() => c,
            _ => {
                self.notifier.notify(Toast::destructive(
                    "Your cart is empty. Please add items to proceed",
                ));
                return Err(CheckoutError::EmptyCart);
            }
        };

        let address = match address {
            Some(a) => a,
            None => {
                self.notifier
                    .notify(Toast::destructive("Please select one address to proceed."));
                return Err(CheckoutError::NoAddressSelected);
            }
        };

        if let Err(e) = self.payment.load_sdk().await {
            warn!(error = %e, "payment SDK load failed");
            self.notifier.notify(Toast::info("Payment SDK failed to load"));
            return Err(CheckoutError::SdkUnavailable(e.to_string()));
        }

        let total = cart.total_amount();
        let amount = match to_minor_units(total) {
            Some(v) => v,
            None => {
                error!(total = %total, "cart total not representable in minor units");
                self.notifier
                    .notify(Toast::destructive("Order total is invalid"));
                return Err(CheckoutError::AmountNotRepresentable(total));
            }
        };

        let session = PaymentSession {
            key: self.settings.payment_key.clone(),
            amount,
            currency: self.settings.currency.clone(),
            name: self.settings.display_name.clone(),
            description: self.settings.description.clone(),
            image: self.settings.image_url.clone(),
            prefill: PaymentPrefill {
                name: user.name.clone(),
                email: user.email.clone(),
                contact: self.settings.prefill_contact.clone(),
            },
            theme: PaymentTheme {
                color: self.settings.theme_color.clone(),
            },
        };

        info!(
            user_id = user.user_id(),
            amount,
            currency = %self.settings.currency,
            "opening payment session"
        );

        let outcome_rx = match self.payment.open(session).await {
            Ok(rx) => rx,
            Err(e) => {
                error!(error = %e, "payment session open failed");
                self.notifier
                    .notify(Toast::destructive("Payment failed. Please try again."));
                return Err(CheckoutError::PaymentFailed(e.to_string()));
            }
        };

        // Suspension point: the payer is deciding. Nothing is locked here;
        // concurrent checkouts by other users proceed untouched.
        let outcome = outcome_rx
            .await
            .unwrap_or_else(|_| PaymentOutcome::Failed("payment outcome channel closed".to_string()));

        match outcome {
            PaymentOutcome::Completed { payment_id } => {
                self.notifier.notify(Toast::info("Payment Successful!"));
                self.place_order(user, &cart, &address, payment_id).await
            }
            PaymentOutcome::Cancelled => {
                info!(user_id = user.user_id(), "payment cancelled by payer");
                self.notifier.notify(Toast::destructive("Payment Cancelled"));
                Err(CheckoutError::PaymentCancelled)
            }
            PaymentOutcome::Failed(reason) => {
                warn!(user_id = user.user_id(), reason = %reason, "payment failed");
                self.notifier
                    .notify(Toast::destructive("Payment failed. Please try again."));
                Err(CheckoutError::PaymentFailed(reason))
            }
        }
    }

    /// Reachable only from the completed-payment arm, at most once per
    /// attempt. A rejected or failed submission is terminal: the payment is
    /// not compensated and nothing is retried.
    async fn place_order(
        &self,
        user: &Claims,
        cart: &CartSnapshot,
        address: &AddressSelection,
        payment_id: String,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        let order = OrderRequest::build(user.user_id(), cart, address, &self.settings.payment_method);
        info!(
            order_id = %order.order_id,
            user_id = order.user_id,
            total = %order.total_amount,
            "submitting order"
        );

        let result = match self.orders.create_order(&order).await {
            Ok(result) => result,
            Err(e) => {
                error!(order_id = %order.order_id, error = %e, "order store failed");
                self.notifier
                    .notify(Toast::destructive("Order failed. Try again."));
                return Err(CheckoutError::StoreFailed(e));
            }
        };

        if !result.success {
            warn!(order_id = %order.order_id, "order rejected by store");
            self.notifier
                .notify(Toast::destructive("Order failed. Try again."));
            return Err(CheckoutError::OrderRejected);
        }

        self.notifier.notify(Toast::info("Order placed successfully!"));
        self.schedule_redirect();

        Ok(CheckoutReceipt {
            order_id: order.order_id.to_string(),
            payment_id,
            total_amount: order.total_amount,
            redirect_route: self.settings.redirect_route.clone(),
            redirect_delay_ms: self.settings.redirect_delay.as_millis() as u64,
        })
    }

    /// Fire the account-page redirect after the configured delay, off the
    /// request path.
    fn schedule_redirect(&self) {
        let navigator = Arc::clone(&self.navigator);
        let route = self.settings.redirect_route.clone();
        let delay = self.settings.redirect_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            navigator.redirect(&route);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::cart::CartLineItem;
    use crate::checkout::feedback::{RecordingNavigator, RecordingNotifier, ToastVariant};
    use crate::orders::MemoryOrderStore;
    use crate::payment::MockProvider;
    use uuid::Uuid;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn settings() -> CheckoutSettings {
        CheckoutSettings {
            payment_key: "rzp_test_key".to_string(),
            currency: "INR".to_string(),
            payment_method: "razorpay".to_string(),
            display_name: "Demo Shop".to_string(),
            description: "Storefront order".to_string(),
            image_url: "/logo.png".to_string(),
            theme_color: "#3399cc".to_string(),
            prefill_contact: "9999999999".to_string(),
            redirect_route: "/shop/account".to_string(),
            redirect_delay: Duration::from_millis(5),
        }
    }

    fn claims() -> Claims {
        Claims {
            sub: "42".to_string(),
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            exp: 4_000_000_000,
            iat: 1_700_000_000,
        }
    }

    fn cart() -> CartSnapshot {
        CartSnapshot::new(
            Uuid::new_v4(),
            vec![
                CartLineItem {
                    product_id: "shoe-42".to_string(),
                    title: "Running Shoe".to_string(),
                    image: "/img/shoe.png".to_string(),
                    price: d("100.00"),
                    sale_price: d("80.00"),
                    quantity: 2,
                },
                CartLineItem {
                    product_id: "cap-7".to_string(),
                    title: "Cap".to_string(),
                    image: "/img/cap.png".to_string(),
                    price: d("50.00"),
                    sale_price: d("0"),
                    quantity: 1,
                },
            ],
        )
    }

    fn address() -> AddressSelection {
        AddressSelection {
            address_id: "addr-1".to_string(),
            address: "12 MG Road".to_string(),
            city: "Bengaluru".to_string(),
            pincode: "560001".to_string(),
            phone: "9876543210".to_string(),
            notes: String::new(),
        }
    }

    struct Harness {
        workflow: CheckoutWorkflow,
        provider: Arc<MockProvider>,
        store: Arc<MemoryOrderStore>,
        notifier: Arc<RecordingNotifier>,
        navigator: Arc<RecordingNavigator>,
    }

    fn harness(provider: MockProvider) -> Harness {
        let provider = Arc::new(provider);
        let store = Arc::new(MemoryOrderStore::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let navigator = Arc::new(RecordingNavigator::new());
        let workflow = CheckoutWorkflow::new(
            provider.clone(),
            store.clone(),
            notifier.clone(),
            navigator.clone(),
            settings(),
        );
        Harness {
            workflow,
            provider,
            store,
            notifier,
            navigator,
        }
    }

    async fn settle_redirects() {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    #[tokio::test]
    async fn test_empty_cart_short_circuits() {
        let h = harness(MockProvider::completing("pay_1"));

        let err = h
            .workflow
            .initiate_payment(&claims(), Some(CartSnapshot::new(Uuid::new_v4(), vec![])), Some(address()))
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::EmptyCart));
        assert_eq!(h.provider.sdk_loads(), 0);
        assert!(h.provider.opened_sessions().is_empty());
        assert_eq!(h.store.order_count(), 0);

        let toasts = h.notifier.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].title, "Your cart is empty. Please add items to proceed");
        assert_eq!(toasts[0].variant, ToastVariant::Destructive);
    }

    #[tokio::test]
    async fn test_missing_cart_counts_as_empty() {
        let h = harness(MockProvider::completing("pay_1"));
        let err = h
            .workflow
            .initiate_payment(&claims(), None, Some(address()))
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));
        assert_eq!(h.provider.sdk_loads(), 0);
    }

    #[tokio::test]
    async fn test_missing_address_short_circuits_after_cart() {
        let h = harness(MockProvider::completing("pay_1"));

        let err = h
            .workflow
            .initiate_payment(&claims(), Some(cart()), None)
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::NoAddressSelected));
        assert_eq!(h.provider.sdk_loads(), 0);
        assert_eq!(h.store.order_count(), 0);
        assert_eq!(
            h.notifier.titles(),
            vec!["Please select one address to proceed.".to_string()]
        );
    }

    #[tokio::test]
    async fn test_empty_cart_reported_before_missing_address() {
        let h = harness(MockProvider::completing("pay_1"));
        let err = h
            .workflow
            .initiate_payment(&claims(), None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));
    }

    #[tokio::test]
    async fn test_sdk_failure_opens_no_session() {
        let h = harness(MockProvider::with_sdk_error("network unreachable"));

        let err = h
            .workflow
            .initiate_payment(&claims(), Some(cart()), Some(address()))
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::SdkUnavailable(_)));
        assert!(h.provider.opened_sessions().is_empty());
        assert_eq!(h.store.order_count(), 0);
        assert_eq!(h.notifier.titles(), vec!["Payment SDK failed to load".to_string()]);
    }

    #[tokio::test]
    async fn test_session_carries_minor_units_and_prefill() {
        let h = harness(MockProvider::completing("pay_1"));

        h.workflow
            .initiate_payment(&claims(), Some(cart()), Some(address()))
            .await
            .unwrap();

        let sessions = h.provider.opened_sessions();
        assert_eq!(sessions.len(), 1);
        let session = &sessions[0];
        // 210.00 major units -> 21000 minor units
        assert_eq!(session.amount, 21000);
        assert_eq!(session.currency, "INR");
        assert_eq!(session.key, "rzp_test_key");
        assert_eq!(session.prefill.name, "Ada Lovelace");
        assert_eq!(session.prefill.email, "ada@example.com");
        assert_eq!(session.prefill.contact, "9999999999");
        assert_eq!(session.theme.color, "#3399cc");
    }

    #[tokio::test]
    async fn test_sub_cent_total_rejected_before_opening() {
        let h = harness(MockProvider::completing("pay_1"));
        let cart = CartSnapshot::new(
            Uuid::new_v4(),
            vec![CartLineItem {
                product_id: "odd".to_string(),
                title: "Odd Pricing".to_string(),
                image: "/img/odd.png".to_string(),
                price: d("10.005"),
                sale_price: d("0"),
                quantity: 1,
            }],
        );

        let err = h
            .workflow
            .initiate_payment(&claims(), Some(cart), Some(address()))
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::AmountNotRepresentable(_)));
        assert!(h.provider.opened_sessions().is_empty());
    }

    #[tokio::test]
    async fn test_completed_payment_places_order_and_redirects() {
        let h = harness(MockProvider::completing("pay_777"));

        let receipt = h
            .workflow
            .initiate_payment(&claims(), Some(cart()), Some(address()))
            .await
            .unwrap();

        assert_eq!(receipt.payment_id, "pay_777");
        assert_eq!(receipt.total_amount, d("210.00"));
        assert_eq!(receipt.redirect_route, "/shop/account");

        assert_eq!(h.store.order_count(), 1);
        let stored = h.store.get(&receipt.order_id).unwrap();
        assert_eq!(stored.user_id, 42);
        assert_eq!(stored.payment_method, "razorpay");
        assert_eq!(stored.total_amount, d("210.00"));
        assert_eq!(stored.line_items[0].price, d("80.00"));

        assert_eq!(
            h.notifier.titles(),
            vec![
                "Payment Successful!".to_string(),
                "Order placed successfully!".to_string()
            ]
        );

        settle_redirects().await;
        assert_eq!(h.navigator.routes(), vec!["/shop/account".to_string()]);
    }

    #[tokio::test]
    async fn test_cancelled_payment_places_no_order() {
        let h = harness(MockProvider::cancelling());

        let err = h
            .workflow
            .initiate_payment(&claims(), Some(cart()), Some(address()))
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::PaymentCancelled));
        assert_eq!(h.store.order_count(), 0);
        assert!(h.notifier.titles().contains(&"Payment Cancelled".to_string()));

        settle_redirects().await;
        assert!(h.navigator.routes().is_empty());
    }

    #[tokio::test]
    async fn test_failed_payment_places_no_order() {
        let h = harness(MockProvider::failing("card declined"));

        let err = h
            .workflow
            .initiate_payment(&claims(), Some(cart()), Some(address()))
            .await
            .unwrap_err();

        match err {
            CheckoutError::PaymentFailed(reason) => assert_eq!(reason, "card declined"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(h.store.order_count(), 0);
    }

    #[tokio::test]
    async fn test_dropped_outcome_channel_is_a_failure() {
        let h = harness(MockProvider::dropping());

        let err = h
            .workflow
            .initiate_payment(&claims(), Some(cart()), Some(address()))
            .await
            .unwrap_err();

        match err {
            CheckoutError::PaymentFailed(reason) => {
                assert_eq!(reason, "payment outcome channel closed")
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(h.store.order_count(), 0);
    }

    #[tokio::test]
    async fn test_store_rejection_is_terminal_without_navigation() {
        let h = harness(MockProvider::completing("pay_1"));
        h.store.reject_next_create();

        let err = h
            .workflow
            .initiate_payment(&claims(), Some(cart()), Some(address()))
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::OrderRejected));
        assert_eq!(h.store.order_count(), 0);
        assert!(h.notifier.titles().contains(&"Order failed. Try again.".to_string()));

        settle_redirects().await;
        assert!(h.navigator.routes().is_empty());
    }

    #[tokio::test]
    async fn test_store_outage_is_terminal_without_navigation() {
        let h = harness(MockProvider::completing("pay_1"));
        h.store.fail_next_create();

        let err = h
            .workflow
            .initiate_payment(&claims(), Some(cart()), Some(address()))
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::StoreFailed(_)));
        assert_eq!(h.store.order_count(), 0);

        settle_redirects().await;
        assert!(h.navigator.routes().is_empty());
    }
}
