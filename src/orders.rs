//! Orders

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::items::LineItem;

const ORDER_ID_PREFIX: &str = "ORDER-";

/// Time-derived order identifier (`ORDER-<unix millis>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Builds the id for an order placed at `millis` since the unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Self(format!("{ORDER_ID_PREFIX}{millis}"))
    }

    /// The id as written in the order log.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The millisecond the id was derived from, if it has the usual shape.
    pub fn millis(&self) -> Option<i64> {
        self.0.strip_prefix(ORDER_ID_PREFIX)?.parse().ok()
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Fulfilment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Received, not yet processed
    Pending,

    /// Payment taken
    Processing,

    /// Handed to the carrier
    Shipped,

    /// Received by the customer
    Delivered,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let label = match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
        };

        f.write_str(label)
    }
}

/// Shipping and contact details collected at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    /// Full name
    pub name: String,

    /// Email address
    pub email: String,

    /// Street address
    pub address: String,

    /// City
    pub city: String,

    /// Postal code
    pub zip_code: String,

    /// Phone number
    pub phone: String,
}

impl CustomerInfo {
    /// Name of the first blank field, as it appears in the stored record.
    ///
    /// Only presence is checked; formats are not validated.
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("address", &self.address),
            ("city", &self.city),
            ("zipCode", &self.zip_code),
            ("phone", &self.phone),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}

/// Immutable record of a completed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order id
    pub id: OrderId,

    /// Cart contents at submission time
    pub items: Vec<LineItem>,

    /// Subtotal plus shipping and tax, unrounded
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,

    /// Customer details
    pub customer_info: CustomerInfo,

    /// Fulfilment status
    pub status: OrderStatus,

    /// Submission time
    pub created_at: Timestamp,
}

impl Order {
    /// Total number of units ordered.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

/// Finds an order by id in a log.
pub fn find<'a>(orders: &'a [Order], id: &OrderId) -> Option<&'a Order> {
    orders.iter().find(|order| &order.id == id)
}
