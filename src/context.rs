//! Storefront Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError, HttpCatalog, ProductLoader},
    checkout::Checkout,
    clock::{Clock, SystemClock},
    config::StorefrontConfig,
    engine::CartEngine,
    notifications::NotificationBus,
    storage::{FileStore, Storage, StorageError},
};

/// Errors raised while wiring the storefront together.
#[derive(Debug, Error)]
pub enum ContextInitError {
    /// The profile directory could not be opened.
    #[error("failed to open profile storage")]
    Storage(#[source] StorageError),

    /// The catalog client could not be built.
    #[error("failed to build catalog client")]
    Catalog(#[source] CatalogError),
}

/// Every long-lived storefront component, built once per process.
#[derive(Debug)]
pub struct StorefrontContext {
    /// Typed access to the profile's store.
    pub storage: Storage,

    /// Notification bus shared by all producers.
    pub bus: NotificationBus,

    /// The cart.
    pub engine: CartEngine,

    /// Checkout session for the cart.
    pub checkout: Checkout,

    /// Catalog loader.
    pub products: ProductLoader,
}

impl StorefrontContext {
    /// Builds the context described by `config`, backed by the profile directory.
    ///
    /// # Errors
    ///
    /// Returns a [`ContextInitError`] if the profile directory cannot be opened or the
    /// catalog client cannot be built.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self, ContextInitError> {
        let store = FileStore::open(&config.store.profile_dir).map_err(ContextInitError::Storage)?;
        let catalog = HttpCatalog::new(config.catalog.url.clone(), config.catalog_timeout())
            .map_err(ContextInitError::Catalog)?;

        Ok(Self::new(
            config,
            Storage::new(Arc::new(store)),
            Arc::new(catalog),
            Arc::new(SystemClock),
        ))
    }

    /// Builds the context from explicit parts.
    pub fn new(
        config: &StorefrontConfig,
        storage: Storage,
        catalog: Arc<dyn Catalog>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let bus = NotificationBus::new(clock.clone(), config.notification_settings());

        let engine = CartEngine::with_suppression_window(
            storage.clone(),
            bus.clone(),
            config.cart_suppression_window(),
        );

        let checkout = Checkout::new(storage.clone(), bus.clone(), clock, config.payment_delay());

        Self {
            products: ProductLoader::new(catalog, bus.clone()),
            storage,
            bus,
            engine,
            checkout,
        }
    }
}
