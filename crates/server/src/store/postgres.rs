//! `PostgreSQL` cart store.
//!
//! One row per session in the `carts` table, with the item list held as a
//! JSONB document in the exact shape the API exchanges. Each operation is a
//! read-modify-write against that single document; there is no row lock or
//! transaction around the pair, so concurrent writers to one session resolve
//! as last-write-wins.

use async_trait::async_trait;
use goal_tickets_core::{Cart, CartItem, ItemId, MergePolicy, SessionId};
use sqlx::PgPool;

use super::{CartStore, StoreError};

/// Cart store backed by a `carts` table.
pub struct PgCartStore {
    pool: PgPool,
    policy: MergePolicy,
}

impl PgCartStore {
    /// Create a store over an existing connection pool.
    ///
    /// The `carts` table must exist; run migrations via
    /// `gt-cli migrate` first.
    #[must_use]
    pub const fn new(pool: PgPool, policy: MergePolicy) -> Self {
        Self { pool, policy }
    }

    /// Load a session's cart document, decoding the JSONB item list.
    async fn load(&self, session: &SessionId) -> Result<Cart, StoreError> {
        let row: Option<(serde_json::Value,)> =
            sqlx::query_as("SELECT items FROM carts WHERE session_id = $1")
                .bind(session.as_str())
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some((items,)) => {
                serde_json::from_value(items).map_err(|e| StoreError::Corrupt(e.to_string()))
            }
            None => Ok(Cart::new()),
        }
    }

    /// Write back the whole document, creating the row on first write.
    async fn save(&self, session: &SessionId, cart: &Cart) -> Result<(), StoreError> {
        let items = serde_json::to_value(cart).map_err(|e| StoreError::Corrupt(e.to_string()))?;

        sqlx::query(
            "INSERT INTO carts (session_id, items, updated_at) VALUES ($1, $2, now()) \
             ON CONFLICT (session_id) DO UPDATE SET items = EXCLUDED.items, updated_at = now()",
        )
        .bind(session.as_str())
        .bind(items)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl CartStore for PgCartStore {
    async fn get(&self, session: &SessionId) -> Result<Cart, StoreError> {
        self.load(session).await
    }

    async fn add(&self, session: &SessionId, item: CartItem) -> Result<Cart, StoreError> {
        let mut cart = self.load(session).await?;
        cart.add(item, self.policy);
        self.save(session, &cart).await?;
        Ok(cart)
    }

    async fn set_quantity(
        &self,
        session: &SessionId,
        item: &ItemId,
        quantity: i64,
    ) -> Result<Cart, StoreError> {
        let mut cart = self.load(session).await?;
        cart.set_quantity(item, quantity);
        self.save(session, &cart).await?;
        Ok(cart)
    }

    async fn remove(&self, session: &SessionId, item: &ItemId) -> Result<Cart, StoreError> {
        let mut cart = self.load(session).await?;
        cart.remove(item);
        self.save(session, &cart).await?;
        Ok(cart)
    }

    async fn clear(&self, session: &SessionId) -> Result<Cart, StoreError> {
        // Dropping the document is indistinguishable from an empty cart on
        // the next read.
        sqlx::query("DELETE FROM carts WHERE session_id = $1")
            .bind(session.as_str())
            .execute(&self.pool)
            .await?;

        Ok(Cart::new())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
