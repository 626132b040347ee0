//! Fan-ID notification endpoint.
//!
//! Fire-and-forget: the relay task is spawned and the endpoint reports
//! success regardless of downstream delivery, so a broken webhook never
//! breaks the checkout flow.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use crate::services::telegram;
use crate::state::AppState;

/// Payload the cart client posts when a fan ID is applied.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FanIdNotification {
    pub session_id: String,
    pub fan_id: String,
    #[serde(
        deserialize_with = "goal_tickets_core::types::quantity::lenient_price",
        default
    )]
    pub cart_total: Decimal,
}

/// Relay a fan-ID submission to the staff chat.
#[instrument(skip(state, payload), fields(session_id = %payload.session_id))]
pub async fn fan_id(
    State(state): State<AppState>,
    Json(payload): Json<FanIdNotification>,
) -> Json<Value> {
    if let Some(notifier) = state.notifier() {
        let notifier = notifier.clone();
        let text = telegram::fan_id_message(
            &payload.session_id,
            &payload.fan_id,
            payload.cart_total,
        );
        tokio::spawn(async move {
            if let Err(e) = notifier.send_message(&text).await {
                tracing::error!("Failed to send fan ID notification: {e}");
            }
        });
    } else {
        tracing::debug!("No notification relay configured, dropping fan ID message");
    }

    Json(json!({ "success": true }))
}
