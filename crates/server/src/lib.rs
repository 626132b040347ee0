//! Goal Tickets cart server library.
//!
//! This crate provides the cart API as a library, allowing it to be tested
//! in-process and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router with its middleware stack.
#[must_use]
pub fn app(state: AppState) -> Router {
    routes::routes()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
