//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::Cart,
    catalog::{Catalog, CatalogError, HttpCatalog, ProductLoader},
    checkout::{Checkout, CheckoutError, CheckoutState},
    clock::{Clock, ManualClock, SystemClock},
    config::StorefrontConfig,
    context::{ContextInitError, StorefrontContext},
    engine::{CartEngine, Effect},
    items::LineItem,
    notifications::{
        Notification, NotificationBus, NotificationId, NotificationRequest, NotificationSettings,
        Severity,
    },
    orders::{CustomerInfo, Order, OrderId, OrderStatus},
    pricing::{PriceSummary, format_money},
    products::{Product, ProductId},
    storage::{FileStore, KeyValueStore, MemoryStore, Storage, StorageError},
    themes::{Layout, ThemeId},
};
