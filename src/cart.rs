//! Cart

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::{
    items::LineItem,
    pricing::PriceSummary,
    products::{Product, ProductId},
};

/// Ordered collection of line items, at most one per product.
///
/// Mutation is crate-private; callers go through [`CartEngine`](crate::engine::CartEngine).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

/// Result of adding a product to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Added {
    /// A new line was inserted.
    New,

    /// An existing line was bumped to the given quantity.
    Incremented(u32),

    /// The line is already at the largest representable quantity.
    Unchanged,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up the line for a product.
    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities over all lines.
    pub fn total_item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of `unit_price × quantity` over all lines, unrounded.
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Shipping, tax and total for the current contents.
    pub fn summary(&self) -> PriceSummary {
        PriceSummary::from_subtotal(self.total_price())
    }

    pub(crate) fn add(&mut self, product: &Product) -> Added {
        match self.items.iter_mut().find(|item| item.id == product.id) {
            Some(item) => match item.quantity.checked_add(1) {
                Some(quantity) => {
                    item.quantity = quantity;

                    Added::Incremented(quantity)
                }
                None => Added::Unchanged,
            },
            None => {
                self.items.push(LineItem::from_product(product));

                Added::New
            }
        }
    }

    pub(crate) fn remove(&mut self, id: ProductId) -> Option<LineItem> {
        let position = self.items.iter().position(|item| item.id == id)?;

        Some(self.items.remove(position))
    }

    /// Sets a non-zero quantity, returning the line when the value changed.
    pub(crate) fn set_quantity(&mut self, id: ProductId, quantity: u32) -> Option<&LineItem> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id && item.quantity != quantity)?;

        item.quantity = quantity;

        Some(item)
    }

    /// Empties the cart, returning how many lines were dropped.
    pub(crate) fn clear(&mut self) -> usize {
        let removed = self.items.len();
        self.items.clear();

        removed
    }
}

/// Rebuilds a cart from stored lines, repairing anything that breaks the line invariants.
impl From<Vec<LineItem>> for Cart {
    fn from(items: Vec<LineItem>) -> Self {
        let mut cart = Cart::new();

        for item in items {
            if item.quantity == 0 || item.unit_price < Decimal::ZERO {
                warn!(product_id = item.id, "dropping invalid stored cart line");

                continue;
            }

            match cart.items.iter_mut().find(|existing| existing.id == item.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity);
                }
                None => cart.items.push(item),
            }
        }

        cart
    }
}
