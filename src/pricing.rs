//! Pricing
//!
//! The one formula used for every displayed or persisted total.

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso};

/// Subtotals strictly above this ship for free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Flat shipping fee below the free-shipping threshold.
pub const SHIPPING_FEE: Decimal = Decimal::from_parts(999, 0, 0, false, 2);

/// Sales tax rate applied to the subtotal.
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Breakdown of a cart total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceSummary {
    /// Sum of line totals
    pub subtotal: Decimal,

    /// Shipping charge
    pub shipping: Decimal,

    /// Tax on the subtotal
    pub tax: Decimal,

    /// `subtotal + shipping + tax`
    pub total: Decimal,
}

impl PriceSummary {
    /// Applies shipping and tax to `subtotal`. No rounding is applied.
    pub fn from_subtotal(subtotal: Decimal) -> Self {
        let shipping = if subtotal > FREE_SHIPPING_THRESHOLD {
            Decimal::ZERO
        } else {
            SHIPPING_FEE
        };

        let tax = subtotal * TAX_RATE;

        Self {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }

    /// Whether shipping is free for this subtotal.
    pub fn has_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

/// Formats an amount as US dollars, rounded to cents.
pub fn format_money(amount: Decimal) -> String {
    let cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    format!("{}", Money::from_decimal(cents, iso::USD))
}
