//! Cart route handlers.
//!
//! Every mutation responds with the full updated cart; the client replaces
//! its mirror with whatever comes back, making the server authoritative.

use axum::{Json, extract::Path, extract::State};
use goal_tickets_core::{CartItem, ItemId, SessionId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// Response envelope shared by all cart endpoints.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub success: bool,
    pub cart: Vec<CartItem>,
}

impl CartResponse {
    fn from_cart(cart: goal_tickets_core::Cart) -> Json<Self> {
        Json(Self {
            success: true,
            cart: cart.into_items(),
        })
    }
}

/// Update form body. Quantity coercion is lenient; see the core crate.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityBody {
    #[serde(deserialize_with = "goal_tickets_core::types::quantity::lenient_update_quantity")]
    pub quantity: i64,
}

/// Get a session's cart; unknown sessions read as empty.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<CartResponse>> {
    let session = SessionId::new(session_id);
    let cart = state.store().get(&session).await?;
    Ok(CartResponse::from_cart(cart))
}

/// Add an item, merging per the configured policy.
#[instrument(skip(state, item), fields(item_id = %item.id))]
pub async fn add(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(item): Json<CartItem>,
) -> Result<Json<CartResponse>> {
    let session = SessionId::new(session_id);
    let cart = state.store().add(&session, item).await?;
    Ok(CartResponse::from_cart(cart))
}

/// Update a line's quantity; zero or less removes the line.
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    Path((session_id, item_id)): Path<(String, String)>,
    Json(body): Json<UpdateQuantityBody>,
) -> Result<Json<CartResponse>> {
    let session = SessionId::new(session_id);
    let item = ItemId::new(item_id);
    let cart = state
        .store()
        .set_quantity(&session, &item, body.quantity)
        .await?;
    Ok(CartResponse::from_cart(cart))
}

/// Remove a line; removing an absent line still succeeds.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path((session_id, item_id)): Path<(String, String)>,
) -> Result<Json<CartResponse>> {
    let session = SessionId::new(session_id);
    let item = ItemId::new(item_id);
    let cart = state.store().remove(&session, &item).await?;
    Ok(CartResponse::from_cart(cart))
}

/// Clear a session's cart.
#[instrument(skip(state))]
pub async fn clear(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<CartResponse>> {
    let session = SessionId::new(session_id);
    let cart = state.store().clear(&session).await?;
    Ok(CartResponse::from_cart(cart))
}
