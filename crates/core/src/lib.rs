//! Goal Tickets Core - Shared cart types.
//!
//! This crate provides the types shared by the cart server and the cart
//! client:
//! - `server` - Cart REST API and notification relay
//! - `client` - Browser-side cart state, checkout handoff, sync triggers
//! - `cli` - Migrations and cart inspection tools
//!
//! # Architecture
//!
//! The core crate contains only types and the cart state machine - no I/O,
//! no database access, no HTTP clients. Both sides of the sync protocol
//! apply the same merge and quantity rules by going through [`Cart`].
//!
//! # Modules
//!
//! - [`types`] - Session/item tokens, cart items, the cart itself, merge policy

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
