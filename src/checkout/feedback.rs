//! User-facing feedback seams: toast notifications and client navigation.
//!
//! The workflow reports progress through these traits instead of returning
//! presentation strings; the gateway wires in logging implementations, tests
//! wire in recording ones.

use std::sync::Mutex;

use tracing::{info, warn};

/// Severity of a toast, mirroring the storefront's two notification styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn info(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            variant: ToastVariant::Default,
        }
    }

    pub fn destructive(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            variant: ToastVariant::Destructive,
        }
    }
}

/// Delivers user-facing notifications for checkout progress.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Requests a client-side navigation after checkout settles.
pub trait Navigator: Send + Sync {
    fn redirect(&self, route: &str);
}

/// Headless notifier: toasts land in the log at a level matching their
/// severity.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        match toast.variant {
            ToastVariant::Default => info!(toast = %toast.title, "notify"),
            ToastVariant::Destructive => warn!(toast = %toast.title, "notify"),
        }
    }
}

/// Headless navigator: redirects land in the log.
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn redirect(&self, route: &str) {
        info!(route = %route, "client redirect requested");
    }
}

/// Recording notifier for tests and embedding.
pub struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            toasts: Mutex::new(Vec::new()),
        }
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap().clone()
    }

    pub fn titles(&self) -> Vec<String> {
        self.toasts().into_iter().map(|t| t.title).collect()
    }
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        self.toasts.lock().unwrap().push(toast);
    }
}

/// Recording navigator for tests and embedding.
pub struct RecordingNavigator {
    routes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self {
            routes: Mutex::new(Vec::new()),
        }
    }

    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().unwrap().clone()
    }
}

impl Default for RecordingNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, route: &str) {
        self.routes.lock().unwrap().push(route.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify(Toast::info("Payment Successful!"));
        notifier.notify(Toast::destructive("Order failed. Try again."));

        let toasts = notifier.toasts();
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[0].variant, ToastVariant::Default);
        assert_eq!(toasts[1].variant, ToastVariant::Destructive);
    }

    #[test]
    fn test_recording_navigator_captures_route() {
        let navigator = RecordingNavigator::new();
        navigator.redirect("/shop/account");
        assert_eq!(navigator.routes(), vec!["/shop/account".to_string()]);
    }
}
