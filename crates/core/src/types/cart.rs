//! The cart state machine.
//!
//! Both the server store and the client mirror apply mutations through this
//! type, so the merge and quantity rules live in exactly one place.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::item::CartItem;
use super::token::ItemId;

/// The rule deciding whether an added item combines with an existing line.
///
/// The storefront shipped both behaviors over its lifetime; which one is in
/// effect is a deployment decision, not a per-request one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// Merge when the incoming item's `id` matches an existing line.
    #[default]
    ById,
    /// Merge when both `title` and `category` match an existing line.
    TitleCategory,
}

/// Error parsing a [`MergePolicy`] from configuration.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown merge policy {0:?} (expected \"id\" or \"title-category\")")]
pub struct MergePolicyParseError(String);

impl FromStr for MergePolicy {
    type Err = MergePolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(Self::ById),
            "title-category" => Ok(Self::TitleCategory),
            other => Err(MergePolicyParseError(other.to_owned())),
        }
    }
}

/// An ordered collection of line items owned by one session.
///
/// Order is insertion order and carries no meaning. Serializes transparently
/// as the JSON array the API exchanges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from an item list (e.g., a server response).
    #[must_use]
    pub fn from_items(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Total unit count across all lines (the count badge value).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of `price * quantity` over all lines; zero for an empty cart.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Look up a line by id.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Add an item, merging with an existing line per `policy`.
    ///
    /// A merge increments the existing line's quantity by the incoming
    /// quantity; otherwise the item is appended as a new line.
    pub fn add(&mut self, item: CartItem, policy: MergePolicy) {
        let existing = self.items.iter_mut().find(|line| match policy {
            MergePolicy::ById => line.id == item.id,
            MergePolicy::TitleCategory => {
                line.title == item.title && line.category == item.category
            }
        });

        match existing {
            Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
            None => self.items.push(item),
        }
    }

    /// Set a line's quantity; `quantity <= 0` removes the line.
    ///
    /// Unknown ids are a silent no-op. A quantity of zero or less never
    /// persists.
    pub fn set_quantity(&mut self, id: &ItemId, quantity: i64) {
        let Some(pos) = self.items.iter().position(|i| &i.id == id) else {
            return;
        };

        if quantity > 0 {
            if let Some(line) = self.items.get_mut(pos) {
                line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
            }
        } else {
            self.items.remove(pos);
        }
    }

    /// Remove a line by id; idempotent.
    pub fn remove(&mut self, id: &ItemId) {
        self.items.retain(|i| &i.id != id);
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ga_item(id: &str, quantity: u32) -> CartItem {
        CartItem {
            id: ItemId::new(id),
            title: "GA".to_owned(),
            category: "Stand A".to_owned(),
            price: Decimal::from(100),
            quantity,
            image: String::new(),
        }
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        let cart = Cart::new();
        assert_eq!(cart.total(), Decimal::ZERO);
        assert_eq!(cart.item_count(), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_merge_by_id_combines_same_id() {
        let mut cart = Cart::new();
        cart.add(ga_item("item_1", 2), MergePolicy::ById);
        assert_eq!(cart.total(), Decimal::from(200));

        cart.add(ga_item("item_1", 1), MergePolicy::ById);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total(), Decimal::from(300));
    }

    #[test]
    fn test_merge_by_id_keeps_distinct_ids_separate() {
        let mut cart = Cart::new();
        cart.add(ga_item("item_1", 2), MergePolicy::ById);
        cart.add(ga_item("item_2", 1), MergePolicy::ById);

        // Two lines, but the total still reflects every unit.
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(), Decimal::from(300));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_merge_by_title_category_combines_distinct_ids() {
        let mut cart = Cart::new();
        cart.add(ga_item("item_1", 2), MergePolicy::TitleCategory);
        cart.add(ga_item("item_2", 1), MergePolicy::TitleCategory);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total(), Decimal::from(300));
    }

    #[test]
    fn test_merge_by_title_category_distinguishes_categories() {
        let mut cart = Cart::new();
        let mut stand_b = ga_item("item_2", 1);
        stand_b.category = "Stand B".to_owned();

        cart.add(ga_item("item_1", 1), MergePolicy::TitleCategory);
        cart.add(stand_b, MergePolicy::TitleCategory);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_set_quantity_updates_line() {
        let mut cart = Cart::new();
        cart.add(ga_item("item_1", 2), MergePolicy::ById);
        cart.set_quantity(&ItemId::new("item_1"), 5);
        assert_eq!(cart.get(&ItemId::new("item_1")).map(|i| i.quantity), Some(5));
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(ga_item("item_1", 2), MergePolicy::ById);
        cart.set_quantity(&ItemId::new("item_1"), 0);
        assert!(cart.is_empty());

        cart.add(ga_item("item_2", 1), MergePolicy::ById);
        cart.set_quantity(&ItemId::new("item_2"), -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(ga_item("item_1", 2), MergePolicy::ById);
        cart.set_quantity(&ItemId::new("item_404"), 9);
        assert_eq!(cart.get(&ItemId::new("item_1")).map(|i| i.quantity), Some(2));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = Cart::new();
        cart.add(ga_item("item_1", 2), MergePolicy::ById);

        cart.remove(&ItemId::new("item_404"));
        assert_eq!(cart.len(), 1);

        cart.remove(&ItemId::new("item_1"));
        cart.remove(&ItemId::new("item_1"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut cart = Cart::new();
        cart.add(ga_item("item_1", 2), MergePolicy::ById);
        cart.add(ga_item("item_2", 1), MergePolicy::ById);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn test_merge_policy_parsing() {
        assert_eq!("id".parse::<MergePolicy>().expect("id"), MergePolicy::ById);
        assert_eq!(
            "title-category".parse::<MergePolicy>().expect("tc"),
            MergePolicy::TitleCategory
        );
        assert!("by-vibes".parse::<MergePolicy>().is_err());
    }

    #[test]
    fn test_cart_serializes_as_bare_array() {
        let mut cart = Cart::new();
        cart.add(ga_item("item_1", 2), MergePolicy::ById);
        let json = serde_json::to_value(&cart).expect("json");
        assert!(json.is_array());
    }
}
