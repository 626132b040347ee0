//! Goal Tickets cart client state.
//!
//! The browser-resident half of the cart sync protocol: a local mirror of
//! the server-side cart, kept authoritative-server-fresh by explicit
//! round-trips and a set of staleness-compensating sync triggers.
//!
//! The state is an explicitly constructed [`CartClientState`] instance owned
//! by the page bootstrap and passed by reference to whatever UI controller
//! needs it; there is no global singleton. Presentation concerns (DOM
//! rendering, navigation, durable storage) enter through the
//! [`CartRenderer`], [`Navigator`], and [`KeyValueStorage`] traits, so cart
//! logic stays decoupled from any event-binding strategy.
//!
//! # Bootstrap
//!
//! ```rust,ignore
//! let storage = Arc::new(FileStorage::new(profile_dir));
//! let session = SessionProvider::new(vec![storage.clone()]);
//! let mut cart = CartClientState::new(api, session, storage, renderer, checkout);
//!
//! cart.init(&location, &mut navigator).await;
//!
//! // Staleness compensation: queue the post-load re-syncs and drain
//! // triggers for as long as the page lives. Dropping the scheduler
//! // cancels anything still pending.
//! let (mut scheduler, mut triggers) = ResyncScheduler::channel();
//! scheduler.schedule_initial();
//! while let Some(trigger) = triggers.recv().await {
//!     cart.handle_trigger(trigger).await;
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod checkout;
pub mod error;
pub mod render;
pub mod session;
pub mod state;
pub mod storage;
pub mod sync;

pub use api::CartApi;
pub use checkout::{CheckoutConfig, CheckoutError, SNAPSHOT_KEY};
pub use error::ClientError;
pub use render::{CartLineView, CartRenderer, CartView, Navigator, NullRenderer};
pub use session::SessionProvider;
pub use state::CartClientState;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use sync::{PaymentOutcome, PaymentReturn, ResyncScheduler, SyncTrigger};
