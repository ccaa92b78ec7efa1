//! Catalog Config

use clap::Args;

/// Product catalog settings.
#[derive(Debug, Clone, Args)]
pub struct CatalogConfig {
    /// Catalog endpoint returning a JSON array of products
    #[arg(
        long = "catalog-url",
        env = "CATALOG_URL",
        default_value = "https://fakestoreapi.com/products"
    )]
    pub url: String,

    /// Catalog request timeout in seconds
    #[arg(
        long = "catalog-timeout-seconds",
        env = "CATALOG_TIMEOUT_SECONDS",
        default_value_t = 10u64
    )]
    pub timeout_seconds: u64,
}
