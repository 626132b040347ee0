//! Server-side cart persistence keyed by session identifier.
//!
//! Two backends implement [`CartStore`]: an in-memory map for development
//! and tests, and a `PostgreSQL` store holding one JSONB document per
//! session. Every operation returns the full updated cart so the client can
//! mirror the authoritative state without a second round-trip.
//!
//! There is no cross-operation transaction: concurrent requests against the
//! same session read, mutate, and write back at whole-cart granularity, and
//! the last write wins.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use goal_tickets_core::{Cart, CartItem, ItemId, SessionId};
use thiserror::Error;

pub use memory::MemoryStore;
pub use postgres::PgCartStore;

/// Errors from the persistence layer.
///
/// Absence is never an error: unknown sessions read as empty carts and
/// unknown item ids are silent no-ops.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored cart document failed to decode.
    #[error("stored cart is corrupt: {0}")]
    Corrupt(String),
}

/// Storage operations for session-scoped carts.
///
/// Carts are created lazily: the first read or write for a session brings an
/// empty cart into being.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Read a session's cart; empty for unknown sessions.
    async fn get(&self, session: &SessionId) -> Result<Cart, StoreError>;

    /// Add an item, merging per the store's configured policy.
    async fn add(&self, session: &SessionId, item: CartItem) -> Result<Cart, StoreError>;

    /// Set a line's quantity; `quantity <= 0` removes the line. Unknown
    /// item ids succeed without changing anything.
    async fn set_quantity(
        &self,
        session: &SessionId,
        item: &ItemId,
        quantity: i64,
    ) -> Result<Cart, StoreError>;

    /// Remove a line; idempotent.
    async fn remove(&self, session: &SessionId, item: &ItemId) -> Result<Cart, StoreError>;

    /// Empty the session's cart.
    async fn clear(&self, session: &SessionId) -> Result<Cart, StoreError>;

    /// Backend connectivity probe for the readiness endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
