//! Product catalog
//!
//! The catalog is read-only and remote. A failed fetch is reported to the user through the
//! notification bus and handed back to the caller; it never affects the cart.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, error};

use crate::{
    notifications::{NotificationBus, NotificationRequest},
    products::Product,
};

const LOADED_TTL: Duration = Duration::from_millis(3000);
const FAILED_TTL: Duration = Duration::from_millis(5000);

/// Errors raised while fetching the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request could not be sent or its body could not be decoded.
    #[error("Failed to fetch products")]
    Request(#[from] reqwest::Error),

    /// The catalog answered with a non-success status.
    #[error("Failed to fetch products: {0}")]
    Status(StatusCode),
}

/// Source of products.
#[automock]
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Retrieves every product.
    async fn list_products(&self) -> Result<Vec<Product>, CatalogError>;
}

/// Catalog served as a JSON array over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    url: String,
}

impl HttpCatalog {
    /// Creates a catalog client for `url`.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Catalog location.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        let products: Vec<Product> = response.json().await?;

        debug!(url = %self.url, count = products.len(), "catalog fetched");

        Ok(products)
    }
}

/// Loads the catalog and tells the user how it went, once.
pub struct ProductLoader {
    catalog: Arc<dyn Catalog>,
    bus: NotificationBus,
    announced: AtomicBool,
}

impl ProductLoader {
    /// Creates a loader that reports through `bus`.
    pub fn new(catalog: Arc<dyn Catalog>, bus: NotificationBus) -> Self {
        Self {
            catalog,
            bus,
            announced: AtomicBool::new(false),
        }
    }

    /// Fetches every product.
    ///
    /// The first call publishes "Products Loaded" or "Loading Failed"; later calls stay quiet.
    ///
    /// # Errors
    ///
    /// Returns the [`CatalogError`] from the underlying catalog.
    pub async fn load(&self) -> Result<Vec<Product>, CatalogError> {
        let result = self.catalog.list_products().await;

        if let Err(error) = &result {
            error!(%error, "failed to load products");
        }

        if self.announced.swap(true, Ordering::SeqCst) {
            return result;
        }

        let notification = match &result {
            Ok(products) => NotificationRequest::success("Products Loaded")
                .with_description(format!("Successfully loaded {} products", products.len()))
                .with_ttl(LOADED_TTL),
            Err(error) => NotificationRequest::error("Loading Failed")
                .with_description(error.to_string())
                .with_ttl(FAILED_TTL),
        };

        self.bus.publish(notification);

        result
    }
}

impl Debug for ProductLoader {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ProductLoader")
            .field("announced", &self.announced.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}
