//! The cart client state: a server-authoritative local mirror.

use std::sync::Arc;

use goal_tickets_core::{Cart, CartItem, ItemId, SessionId};
use rust_decimal::Decimal;
use url::Url;

use crate::api::CartApi;
use crate::checkout::{self, CheckoutConfig, CheckoutError, FAN_ID_KEY, SNAPSHOT_KEY};
use crate::render::{CartRenderer, CartView, Navigator};
use crate::session::SessionProvider;
use crate::storage::KeyValueStorage;
use crate::sync::{SyncTrigger, parse_payment_return, strip_payment_params};

/// Browser-resident cache of the cart, kept in sync with the cart store.
///
/// Every mutation round-trips to the store and replaces the mirror with the
/// server's returned cart; the server, not client intent, is authoritative.
/// Round-trips are not queued, so two rapid operations race and the last
/// response received wins.
pub struct CartClientState {
    api: CartApi,
    session: SessionProvider,
    scratch: Arc<dyn KeyValueStorage>,
    renderer: Box<dyn CartRenderer>,
    checkout: CheckoutConfig,
    cart: Cart,
    fan_id_applied: bool,
    initialized: bool,
}

impl CartClientState {
    /// Assemble the cart state from its collaborators.
    ///
    /// `scratch` holds the pre-payment snapshot and the applied fan ID;
    /// typically it is the same backing store as the session provider's
    /// first slot.
    #[must_use]
    pub fn new(
        api: CartApi,
        session: SessionProvider,
        scratch: Arc<dyn KeyValueStorage>,
        renderer: Box<dyn CartRenderer>,
        checkout: CheckoutConfig,
    ) -> Self {
        Self {
            api,
            session,
            scratch,
            renderer,
            checkout,
            cart: Cart::new(),
            fan_id_applied: false,
            initialized: false,
        }
    }

    /// The session identifier cart calls are addressed to.
    #[must_use]
    pub fn session_id(&self) -> &SessionId {
        self.session.current()
    }

    /// Current mirror contents.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        self.cart.items()
    }

    /// Sum of `price * quantity` over the mirror; zero when empty.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.cart.total()
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether a fan ID has been applied this page lifetime (checkout gate).
    #[must_use]
    pub fn fan_id_applied(&self) -> bool {
        self.fan_id_applied
    }

    /// Initialize: resolve a payment return, fetch, render.
    ///
    /// Re-entrant by design: the UI bootstrap may fire twice, and a second
    /// call only re-fetches and re-renders instead of re-registering
    /// anything.
    pub async fn init(&mut self, location: &Url, nav: &mut dyn Navigator) {
        if self.initialized {
            self.sync().await;
            return;
        }

        self.handle_payment_return(location, nav);
        self.refresh_from_store().await;
        self.initialized = true;
    }

    /// Consume a returning-payment redirect, if `location` carries one.
    ///
    /// Adopts the echoed session identifier (so subsequent calls address the
    /// correct server-side cart) and strips the transient query from the
    /// visible URL without reloading. Returns whether a return was handled.
    pub fn handle_payment_return(&mut self, location: &Url, nav: &mut dyn Navigator) -> bool {
        let Some(payment_return) = parse_payment_return(location) else {
            return false;
        };

        tracing::info!(outcome = ?payment_return.outcome, "Payment return detected");
        if let Some(session_id) = payment_return.session_id {
            self.session.adopt(session_id);
        }
        nav.replace(&strip_payment_params(location));
        true
    }

    /// Force a re-fetch from the store and re-render.
    pub async fn sync(&mut self) {
        self.refresh_from_store().await;
    }

    /// React to a staleness trigger; every trigger is a plain re-sync.
    pub async fn handle_trigger(&mut self, trigger: SyncTrigger) {
        tracing::debug!(?trigger, "Sync trigger");
        self.sync().await;
    }

    /// Add an item; returns a success flag for UI feedback.
    pub async fn add_to_cart(&mut self, item: CartItem) -> bool {
        match self.api.add(self.session.current(), &item).await {
            Ok(items) => {
                self.cart = Cart::from_items(items);
                self.render();
                self.renderer.open_cart();
                true
            }
            Err(e) => {
                tracing::error!("Add to cart error: {e}");
                false
            }
        }
    }

    /// Set a line's quantity; the store removes the line at zero or less.
    pub async fn update_quantity(&mut self, id: &ItemId, quantity: i64) {
        match self.api.set_quantity(self.session.current(), id, quantity).await {
            Ok(items) => {
                self.cart = Cart::from_items(items);
                self.render();
            }
            Err(e) => tracing::error!("Update quantity error: {e}"),
        }
    }

    /// Increment a line's quantity by one.
    pub async fn increment(&mut self, id: &ItemId) {
        if let Some(quantity) = self.cart.get(id).map(|i| i.quantity) {
            self.update_quantity(id, i64::from(quantity) + 1).await;
        }
    }

    /// Decrement a line's quantity, floored at 1.
    pub async fn decrement(&mut self, id: &ItemId) {
        let quantity = self.cart.get(id).map_or(0, |i| i.quantity);
        if quantity > 1 {
            self.update_quantity(id, i64::from(quantity) - 1).await;
        }
    }

    /// Remove a line.
    pub async fn remove_from_cart(&mut self, id: &ItemId) {
        match self.api.remove(self.session.current(), id).await {
            Ok(items) => {
                self.cart = Cart::from_items(items);
                self.render();
            }
            Err(e) => tracing::error!("Remove from cart error: {e}"),
        }
    }

    /// Empty the cart.
    pub async fn clear_cart(&mut self) {
        match self.api.clear(self.session.current()).await {
            Ok(items) => {
                self.cart = Cart::from_items(items);
                self.render();
            }
            Err(e) => tracing::error!("Clear cart error: {e}"),
        }
    }

    /// Apply a fan ID: persist it, enable checkout, notify staff.
    ///
    /// Blank input is rejected (the UI shows the required-field state). The
    /// notification is fire-and-forget; a relay failure never blocks the
    /// checkout gate.
    pub async fn apply_fan_id(&mut self, fan_id: &str) -> bool {
        let fan_id = fan_id.trim();
        if fan_id.is_empty() {
            return false;
        }

        self.scratch.store(FAN_ID_KEY, fan_id);
        self.fan_id_applied = true;

        if let Err(e) = self
            .api
            .notify_fan_id(self.session.current(), fan_id, self.cart.total())
            .await
        {
            tracing::error!("Failed to send fan ID notification: {e}");
        }
        true
    }

    /// Snapshot the cart and redirect to the payment collector.
    ///
    /// The redirect is terminal; the cart is left unchanged in the store.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] when there is nothing to pay for.
    pub fn initiate_checkout(&self, nav: &mut dyn Navigator) -> Result<Url, CheckoutError> {
        let url = checkout::build_checkout_url(&self.checkout, self.session.current(), &self.cart)?;

        // Snapshot must land in storage before the navigation wipes the page
        let snapshot =
            serde_json::to_string(self.cart.items()).unwrap_or_else(|_| "[]".to_string());
        self.scratch.store(SNAPSHOT_KEY, &snapshot);
        tracing::info!(total = %self.cart.total(), "Cart saved before payment");

        nav.assign(&url);
        Ok(url)
    }

    async fn refresh_from_store(&mut self) {
        match self.api.fetch(self.session.current()).await {
            Ok(items) => {
                self.cart = Cart::from_items(items);
                if self.cart.is_empty() {
                    self.restore_snapshot().await;
                }
            }
            Err(e) => {
                // Worst case is a cart that appears empty until re-synced
                tracing::error!("Load cart error: {e}");
                self.cart = Cart::new();
            }
        }
        self.render();
    }

    /// Replay the pre-payment snapshot when the server cart came back empty.
    async fn restore_snapshot(&mut self) {
        let Some(raw) = self.scratch.load(SNAPSHOT_KEY) else {
            return;
        };

        let items: Vec<CartItem> = match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("Discarding unreadable cart snapshot: {e}");
                self.scratch.remove(SNAPSHOT_KEY);
                return;
            }
        };

        if items.is_empty() {
            self.scratch.remove(SNAPSHOT_KEY);
            return;
        }

        tracing::info!(items = items.len(), "Restoring cart from snapshot");
        let mut restored = None;
        for item in items {
            match self.api.add(self.session.current(), &item).await {
                Ok(cart) => restored = Some(cart),
                Err(e) => {
                    // Keep the snapshot for the next sync attempt
                    tracing::error!("Error saving cart to server: {e}");
                    return;
                }
            }
        }

        if let Some(items) = restored {
            self.cart = Cart::from_items(items);
            self.scratch.remove(SNAPSHOT_KEY);
        }
    }

    fn render(&mut self) {
        let view = CartView::from_cart(&self.cart);
        self.renderer.set_count(self.cart.item_count());
        self.renderer.render(&view);
    }
}
