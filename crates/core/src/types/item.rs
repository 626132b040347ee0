//! Cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::quantity;
use super::token::ItemId;

/// One line in a cart: a product/quantity/price tuple.
///
/// `title`, `category`, and `image` are descriptive only and never
/// validated. `price` and `quantity` go through lenient coercion on the way
/// in (see [`crate::types::quantity`]); prices serialize as plain JSON
/// numbers, the format the client has always spoken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ItemId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "quantity::lenient_price",
        default
    )]
    pub price: Decimal,
    #[serde(
        deserialize_with = "quantity::lenient_line_quantity",
        default = "default_quantity"
    )]
    pub quantity: u32,
    #[serde(default)]
    pub image: String,
}

/// A line item with no stated quantity means one unit.
const fn default_quantity() -> u32 {
    1
}

impl CartItem {
    /// Line total: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}
