//! Local persistent store
//!
//! A passive mirror of the cart plus the append-only order log and the selected theme, all
//! kept in one [`KeyValueStore`]. Missing or unreadable values read as empty; cart and theme
//! writes that fail are logged and otherwise ignored.

use std::{io, sync::Arc};

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::warn;

use crate::{
    cart::Cart,
    items::LineItem,
    orders::{self, Order, OrderId},
    themes::ThemeId,
};

mod backends;

pub use backends::{FileStore, KeyValueStore, MemoryStore};

/// Key holding the cart as a JSON array of line items.
pub const CART_KEY: &str = "shopping-cart";

/// Key holding the order log as a JSON array of orders.
pub const ORDERS_KEY: &str = "orders";

/// Key holding the selected theme id as a bare string.
pub const THEME_KEY: &str = "selectedTheme";

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backend I/O failed.
    #[error("storage I/O error")]
    Io(#[from] io::Error),

    /// A value could not be serialized.
    #[error("failed to serialize stored value")]
    Serialization(#[from] serde_json::Error),

    /// Writing would exceed the backend's size quota.
    #[error("storage quota exceeded writing {key}: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded {
        /// Key being written
        key: String,

        /// Bytes the store would hold after the write
        needed: usize,

        /// Bytes the store may hold
        quota: usize,
    },

    /// The key cannot be represented by the backend.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// Typed access to the profile's key-value store.
#[derive(Debug, Clone)]
pub struct Storage {
    backend: Arc<dyn KeyValueStore>,
}

impl Storage {
    /// Wraps a backend.
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Storage backed by a fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Underlying backend.
    pub fn backend(&self) -> &Arc<dyn KeyValueStore> {
        &self.backend
    }

    /// Loads the stored cart; empty when absent or unreadable.
    pub fn load_cart(&self) -> Cart {
        self.read::<Vec<LineItem>>(CART_KEY)
            .map(Cart::from)
            .unwrap_or_default()
    }

    /// Overwrites the stored cart. Failures are logged, never returned.
    pub fn save_cart(&self, cart: &Cart) {
        if let Err(error) = self.write(CART_KEY, cart) {
            warn!(%error, key = CART_KEY, lines = cart.len(), "failed to persist cart");
        }
    }

    /// Appends an order to the log by rewriting the whole log.
    ///
    /// An unreadable log is replaced by one holding only `order`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the log cannot be written.
    pub fn append_order(&self, order: &Order) -> Result<(), StorageError> {
        let mut log = self.load_orders();
        log.push(order.clone());

        self.write(ORDERS_KEY, &log)
    }

    /// Order log, oldest first; callers reverse it for newest-first display.
    pub fn load_orders(&self) -> Vec<Order> {
        self.read(ORDERS_KEY).unwrap_or_default()
    }

    /// Looks up a single order by id.
    pub fn find_order(&self, id: &OrderId) -> Option<Order> {
        orders::find(&self.load_orders(), id).cloned()
    }

    /// Selected theme, defaulting when absent or unknown.
    pub fn load_theme(&self) -> ThemeId {
        match self.backend.get(THEME_KEY) {
            Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|error| {
                warn!(%error, "ignoring stored theme");

                ThemeId::default()
            }),
            Ok(None) => ThemeId::default(),
            Err(error) => {
                warn!(%error, key = THEME_KEY, "failed to read theme");

                ThemeId::default()
            }
        }
    }

    /// Records the selected theme. Failures are logged, never returned.
    pub fn save_theme(&self, theme: ThemeId) {
        if let Err(error) = self.backend.set(THEME_KEY, theme.as_str()) {
            warn!(%error, key = THEME_KEY, "failed to persist theme");
        }
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get(key) {
            Ok(raw) => raw?,
            Err(error) => {
                warn!(%error, key, "failed to read stored value");

                return None;
            }
        };

        serde_json::from_str(&raw)
            .inspect_err(|error| warn!(%error, key, "discarding unreadable stored value"))
            .ok()
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;

        self.backend.set(key, &raw)
    }
}
