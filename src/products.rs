//! Products

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product identifier, unique within the catalog and within a cart.
pub type ProductId = u64;

/// Catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier
    pub id: ProductId,

    /// Product title
    pub title: String,

    /// Unit price
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Long-form description
    #[serde(default)]
    pub description: String,

    /// Catalog category
    #[serde(default)]
    pub category: String,

    /// Image URL
    #[serde(default)]
    pub image: String,

    /// Customer rating
    #[serde(default)]
    pub rating: Rating,
}

impl Product {
    /// Creates a product with the given id, title and price and no other details.
    pub fn new(id: ProductId, title: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            description: String::new(),
            category: String::new(),
            image: String::new(),
            rating: Rating::default(),
        }
    }

    /// Sets the product category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the product image URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}

/// Aggregate customer rating
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rating {
    /// Average score
    pub rate: f64,

    /// Number of ratings
    pub count: u64,
}
