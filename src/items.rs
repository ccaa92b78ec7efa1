//! Items

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::products::{Product, ProductId};

/// One product's presence in the cart.
///
/// The stored shape uses the storefront's historical field names (`price`, `image`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product identifier, unique within a cart
    pub id: ProductId,

    /// Product title at the time it was added
    pub title: String,

    /// Price of a single unit
    #[serde(rename = "price", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,

    /// Product image URL
    #[serde(rename = "image")]
    pub image_ref: String,

    /// Number of units, never zero while the item is in a cart
    pub quantity: u32,

    /// Catalog category
    pub category: String,
}

impl LineItem {
    /// Creates a line item with a quantity of one from a catalog product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            unit_price: product.price,
            image_ref: product.image.clone(),
            quantity: 1,
            category: product.category.clone(),
        }
    }

    /// Returns `unit_price × quantity`, unrounded.
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn from_product_starts_at_one() {
        let product = Product::new(7, "Backpack", Decimal::new(10995, 2))
            .with_category("bags")
            .with_image("bag.jpg");

        let item = LineItem::from_product(&product);

        assert_eq!(item.id, 7);
        assert_eq!(item.quantity, 1);
        assert_eq!(item.image_ref, "bag.jpg");
        assert_eq!(item.category, "bags");
    }

    #[test]
    fn line_total_multiplies_quantity() {
        let mut item = LineItem::from_product(&Product::new(1, "Mug", Decimal::new(1299, 2)));
        item.quantity = 3;

        assert_eq!(item.line_total(), Decimal::new(3897, 2));
    }

    #[test]
    fn serializes_with_stored_field_names() -> TestResult {
        let item = LineItem::from_product(
            &Product::new(1, "Widget", Decimal::new(1050, 2)).with_image("w.png"),
        );

        let value = serde_json::to_value(&item)?;

        assert_eq!(value["price"], serde_json::json!(10.5));
        assert_eq!(value["image"], "w.png");
        assert_eq!(value["quantity"], 1);

        Ok(())
    }
}
