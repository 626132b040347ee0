//! HTTP route handlers for the cart API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                                  - Liveness (status, timestamp, uptime)
//! GET    /health/ready                            - Readiness (store probe)
//!
//! # Cart
//! GET    /api/cart/{session_id}                   - Read cart
//! POST   /api/cart/{session_id}/add               - Add item (merge-or-append)
//! PUT    /api/cart/{session_id}/update/{item_id}  - Set quantity (<= 0 removes)
//! DELETE /api/cart/{session_id}/remove/{item_id}  - Remove item
//! DELETE /api/cart/{session_id}                   - Clear cart
//!
//! # Notifications
//! POST   /api/notify/fanid                        - Relay fan ID to staff chat
//! ```

pub mod cart;
pub mod notify;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
};
use serde_json::{Value, json};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/{session_id}", get(cart::show).delete(cart::clear))
        .route("/{session_id}/add", post(cart::add))
        .route("/{session_id}/update/{item_id}", put(cart::update))
        .route(
            "/{session_id}/remove/{item_id}",
            axum::routing::delete(cart::remove),
        )
}

/// Create all routes for the cart API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/api/cart", cart_routes())
        .route("/api/notify/fanid", post(notify::fan_id))
}

/// Liveness health check endpoint.
///
/// Reports uptime alongside the status; does not check dependencies.
async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime": state.uptime_secs(),
    }))
}

/// Readiness health check endpoint.
///
/// Verifies store connectivity before returning OK.
/// Returns 503 Service Unavailable if the store is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.store().ping().await {
        Ok(()) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
