//! Checkout handoff to the external payment collector.
//!
//! Checkout is a side-effect-free snapshot-and-redirect: the payable amount
//! and order metadata are encoded into the collector URL, the current items
//! are snapshotted into scratch storage to survive the navigation away, and
//! the browser leaves. The cart itself is not touched; if the collector
//! never sends the user back, the server-side cart persists unchanged.

use goal_tickets_core::{Cart, SessionId};
use thiserror::Error;
use url::Url;

/// Scratch-storage key for the pre-payment cart snapshot.
pub const SNAPSHOT_KEY: &str = "cart_before_payment";

/// Scratch-storage key for the applied fan ID.
pub const FAN_ID_KEY: &str = "fan_id";

/// Fallback order label for a cart whose first line has no title.
const DEFAULT_ORDER_TITLE: &str = "Ticket Order";

/// External collector endpoint and the fields it is fed.
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// Collector form endpoint, e.g. `https://ticketsbuy.live/connect/form`
    pub collector_url: Url,
    /// Site identifier the collector bills under
    pub site: String,
    /// Base URL the collector redirects back to
    pub return_base: Url,
    /// Billing country code passed through to the collector
    pub billing_country: String,
    /// Currency symbol parameter
    pub currency_symbol: String,
}

/// Errors preventing a checkout handoff.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to pay for; the UI surfaces this before redirecting.
    #[error("cart is empty")]
    EmptyCart,
}

/// Build the collector URL for `cart` under `session`.
///
/// Query parameter names, including the `riderect_*` spellings, are what
/// the collector expects; each return URL embeds the payment outcome and the
/// session identifier so the return trip can reconstitute session
/// continuity.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] when the cart has no lines.
pub fn build_checkout_url(
    config: &CheckoutConfig,
    session: &SessionId,
    cart: &Cart,
) -> Result<Url, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let order_id = cart
        .items()
        .first()
        .map_or(DEFAULT_ORDER_TITLE, |item| item.title.as_str());
    let amount = format!("{:.2}", cart.total());

    let success_url = return_url(config, "/order/success", "success", session);
    let failed_url = return_url(config, "/order/failed", "failed", session);
    let back_url = return_url(config, "/", "back", session);

    let mut url = config.collector_url.clone();
    url.query_pairs_mut()
        .append_pair("site", &config.site)
        .append_pair("amount", &amount)
        .append_pair("symbol", &config.currency_symbol)
        .append_pair("billing_country", &config.billing_country)
        .append_pair("order_id", order_id)
        .append_pair("riderect_success", success_url.as_str())
        .append_pair("riderect_failed", failed_url.as_str())
        .append_pair("riderect_back", back_url.as_str());

    Ok(url)
}

/// Build one of the three return URLs carrying outcome and session.
fn return_url(config: &CheckoutConfig, path: &str, outcome: &str, session: &SessionId) -> Url {
    let mut url = config.return_base.clone();
    url.set_path(path);
    url.query_pairs_mut()
        .append_pair("payment_return", outcome)
        .append_pair("session_id", session.as_str());
    url
}
