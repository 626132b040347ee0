//! In-memory cart store.

use std::collections::HashMap;

use async_trait::async_trait;
use goal_tickets_core::{Cart, CartItem, ItemId, MergePolicy, SessionId};
use tokio::sync::RwLock;

use super::{CartStore, StoreError};

/// Cart store backed by a process-local map.
///
/// Each mutation holds the write lock for its whole read-modify-write, so a
/// single operation is atomic; ordering between concurrent operations is
/// whatever the lock hands out.
pub struct MemoryStore {
    carts: RwLock<HashMap<SessionId, Cart>>,
    policy: MergePolicy,
}

impl MemoryStore {
    /// Create an empty store with the given merge policy.
    #[must_use]
    pub fn new(policy: MergePolicy) -> Self {
        Self {
            carts: RwLock::new(HashMap::new()),
            policy,
        }
    }
}

#[async_trait]
impl CartStore for MemoryStore {
    async fn get(&self, session: &SessionId) -> Result<Cart, StoreError> {
        let carts = self.carts.read().await;
        Ok(carts.get(session).cloned().unwrap_or_default())
    }

    async fn add(&self, session: &SessionId, item: CartItem) -> Result<Cart, StoreError> {
        let mut carts = self.carts.write().await;
        let cart = carts.entry(session.clone()).or_default();
        cart.add(item, self.policy);
        Ok(cart.clone())
    }

    async fn set_quantity(
        &self,
        session: &SessionId,
        item: &ItemId,
        quantity: i64,
    ) -> Result<Cart, StoreError> {
        let mut carts = self.carts.write().await;
        let cart = carts.entry(session.clone()).or_default();
        cart.set_quantity(item, quantity);
        Ok(cart.clone())
    }

    async fn remove(&self, session: &SessionId, item: &ItemId) -> Result<Cart, StoreError> {
        let mut carts = self.carts.write().await;
        let cart = carts.entry(session.clone()).or_default();
        cart.remove(item);
        Ok(cart.clone())
    }

    async fn clear(&self, session: &SessionId) -> Result<Cart, StoreError> {
        let mut carts = self.carts.write().await;
        carts.remove(session);
        Ok(Cart::new())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn item(id: &str, quantity: u32) -> CartItem {
        CartItem {
            id: ItemId::new(id),
            title: "GA".to_owned(),
            category: "Stand A".to_owned(),
            price: Decimal::from(100),
            quantity,
            image: String::new(),
        }
    }

    fn session() -> SessionId {
        SessionId::generate()
    }

    #[tokio::test]
    async fn test_get_unknown_session_is_empty() {
        let store = MemoryStore::new(MergePolicy::ById);
        let cart = store.get(&session()).await.expect("get");
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_operations_accumulate_in_receipt_order() {
        let store = MemoryStore::new(MergePolicy::ById);
        let s = session();

        store.add(&s, item("item_1", 2)).await.expect("add");
        store.add(&s, item("item_2", 1)).await.expect("add");
        store
            .set_quantity(&s, &ItemId::new("item_1"), 5)
            .await
            .expect("update");
        let cart = store
            .remove(&s, &ItemId::new("item_2"))
            .await
            .expect("remove");

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&ItemId::new("item_1")).map(|i| i.quantity), Some(5));
        assert_eq!(store.get(&s).await.expect("get"), cart);
    }

    #[tokio::test]
    async fn test_update_to_zero_removes_line() {
        let store = MemoryStore::new(MergePolicy::ById);
        let s = session();

        store.add(&s, item("item_1", 2)).await.expect("add");
        let cart = store
            .set_quantity(&s, &ItemId::new("item_1"), 0)
            .await
            .expect("update");
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_remove_unknown_item_reports_success() {
        let store = MemoryStore::new(MergePolicy::ById);
        let s = session();

        store.add(&s, item("item_1", 2)).await.expect("add");
        let cart = store
            .remove(&s, &ItemId::new("item_404"))
            .await
            .expect("remove");
        assert_eq!(cart.len(), 1);
    }

    #[tokio::test]
    async fn test_clear_then_get_is_empty() {
        let store = MemoryStore::new(MergePolicy::ById);
        let s = session();

        store.add(&s, item("item_1", 2)).await.expect("add");
        let cleared = store.clear(&s).await.expect("clear");
        assert!(cleared.is_empty());
        assert!(store.get(&s).await.expect("get").is_empty());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = MemoryStore::new(MergePolicy::ById);
        let s1 = session();
        let s2 = session();

        store.add(&s1, item("item_1", 2)).await.expect("add");
        assert!(store.get(&s2).await.expect("get").is_empty());
    }

    #[tokio::test]
    async fn test_title_category_policy_is_honored() {
        let store = MemoryStore::new(MergePolicy::TitleCategory);
        let s = session();

        store.add(&s, item("item_1", 2)).await.expect("add");
        let cart = store.add(&s, item("item_2", 1)).await.expect("add");

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total(), Decimal::from(300));
    }
}
