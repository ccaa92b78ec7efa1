//! Storefront configuration
//!
//! Every setting can come from a flag, an environment variable or a `.env` file.

use std::time::Duration;

use clap::Args;

use crate::{
    config::{
        catalog::CatalogConfig, checkout::CheckoutConfig, notifications::NotificationConfig,
        observability::LoggingConfig, store::StoreConfig,
    },
    notifications::NotificationSettings,
};

pub mod catalog;
pub mod checkout;
pub mod notifications;
pub mod observability;
pub mod store;

/// Storefront settings, grouped by concern.
#[derive(Debug, Clone, Args)]
pub struct StorefrontConfig {
    /// Local profile storage settings.
    #[command(flatten)]
    pub store: StoreConfig,

    /// Product catalog settings.
    #[command(flatten)]
    pub catalog: CatalogConfig,

    /// Notification timing settings.
    #[command(flatten)]
    pub notifications: NotificationConfig,

    /// Checkout settings.
    #[command(flatten)]
    pub checkout: CheckoutConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl StorefrontConfig {
    /// Timing settings for the notification bus.
    #[must_use]
    pub fn notification_settings(&self) -> NotificationSettings {
        NotificationSettings {
            default_ttl: Duration::from_millis(self.notifications.ttl_ms),
            suppression_window: Duration::from_millis(self.notifications.suppression_ms),
        }
    }

    /// Suppression window for cart notifications.
    #[must_use]
    pub fn cart_suppression_window(&self) -> Duration {
        Duration::from_millis(self.notifications.cart_suppression_ms)
    }

    /// Simulated payment processing time.
    #[must_use]
    pub fn payment_delay(&self) -> Duration {
        Duration::from_millis(self.checkout.payment_delay_ms)
    }

    /// Catalog request timeout.
    #[must_use]
    pub fn catalog_timeout(&self) -> Duration {
        Duration::from_secs(self.catalog.timeout_seconds)
    }
}
