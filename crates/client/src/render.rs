//! Cart presentation seams.
//!
//! The cart state exposes pure operations; a thin presentation adapter
//! implements [`CartRenderer`] and [`Navigator`] to bind them to whatever UI
//! and navigation machinery the host page uses. Rendering input is a
//! [`CartView`], a deterministic function of the current cart.

use goal_tickets_core::{Cart, CartItem, ItemId};
use rust_decimal::Decimal;
use url::Url;

/// Display data for one cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    pub id: ItemId,
    pub title: String,
    pub category: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_price: String,
    pub image: Option<String>,
}

/// Display data for the whole cart.
///
/// The empty cart renders distinctly: no lines, footer hidden, total
/// `$0.00`. Adapters re-bind their per-line controls (increment,
/// decrement-floored-at-1, remove) after every render since the line list is
/// regenerated wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub total: String,
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: "$0.00".to_string(),
            item_count: 0,
        }
    }

    /// Build the view for a cart.
    #[must_use]
    pub fn from_cart(cart: &Cart) -> Self {
        if cart.is_empty() {
            return Self::empty();
        }

        Self {
            items: cart.items().iter().map(CartLineView::from).collect(),
            total: format_price(cart.total()),
            item_count: cart.item_count(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&CartItem> for CartLineView {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.clone(),
            title: item.title.clone(),
            category: item.category.clone(),
            quantity: item.quantity,
            unit_price: format_price(item.price),
            line_price: format_price(item.line_total()),
            image: if item.image.is_empty() {
                None
            } else {
                Some(item.image.clone())
            },
        }
    }
}

/// Format an amount as a display price.
fn format_price(amount: Decimal) -> String {
    format!("${amount:.2} USD")
}

/// UI-layer sink for cart state changes.
pub trait CartRenderer: Send {
    /// Replace the rendered cart with `view`.
    fn render(&mut self, view: &CartView);

    /// Update the visible item-count badge.
    fn set_count(&mut self, count: u64);

    /// Open the cart panel.
    fn open_cart(&mut self);

    /// Close the cart panel.
    fn close_cart(&mut self);
}

/// Navigation seam: full-page redirects and non-reloading URL replacement.
pub trait Navigator: Send {
    /// Navigate away (terminal; no in-page continuation).
    fn assign(&mut self, url: &Url);

    /// Replace the visible URL without reloading.
    fn replace(&mut self, url: &Url);
}

/// Renderer that drops everything (headless embedding, tests).
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl CartRenderer for NullRenderer {
    fn render(&mut self, _view: &CartView) {}
    fn set_count(&mut self, _count: u64) {}
    fn open_cart(&mut self) {}
    fn close_cart(&mut self) {}
}
