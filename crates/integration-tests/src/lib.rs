//! Integration tests for the Goal Tickets cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p goal-tickets-integration-tests
//! ```
//!
//! Each test boots the cart server on an ephemeral loopback port with the
//! in-memory store and drives it through raw HTTP or through the real cart
//! client, so the full sync protocol is exercised without any external
//! services.
//!
//! # Test Categories
//!
//! - `cart_api` - REST contract of the cart store
//! - `client_sync` - Client mirror, rendering, and sync triggers
//! - `checkout_flow` - Checkout handoff and payment-return reconciliation

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::missing_panics_doc)]

use std::sync::{Arc, Mutex};

use goal_tickets_client::{
    CartApi, CartRenderer, CartView, CheckoutConfig, Navigator,
};
use goal_tickets_core::MergePolicy;
use goal_tickets_server::config::ServerConfig;
use goal_tickets_server::state::AppState;
use goal_tickets_server::store::MemoryStore;
use url::Url;

/// An in-process cart server plus the clients pointed at it.
pub struct TestContext {
    pub client: reqwest::Client,
    pub base_url: Url,
}

impl TestContext {
    /// Boot the server with the in-memory store on an ephemeral port.
    pub async fn spawn(merge_policy: MergePolicy) -> Self {
        let config = ServerConfig {
            database_url: None,
            host: "127.0.0.1".parse().expect("loopback"),
            port: 0,
            merge_policy,
            telegram: None,
            sentry_dsn: None,
        };

        let store = Arc::new(MemoryStore::new(merge_policy));
        let state = AppState::new(config, store, None);
        let app = goal_tickets_server::app(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });

        Self {
            client: reqwest::Client::new(),
            base_url: Url::parse(&format!("http://{addr}/")).expect("base url"),
        }
    }

    /// A typed cart API client bound to this server.
    #[must_use]
    pub fn api(&self) -> CartApi {
        CartApi::new(self.base_url.clone())
    }

    /// Absolute URL for `path` on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        self.base_url.join(path).expect("join url").to_string()
    }

}

/// Checkout configuration pointing at the production-shaped endpoints.
#[must_use]
pub fn checkout_config() -> CheckoutConfig {
    CheckoutConfig {
        collector_url: Url::parse("https://ticketsbuy.live/connect/form").expect("url"),
        site: "goaltickets.com".to_owned(),
        return_base: Url::parse("https://goaltickets.com").expect("url"),
        billing_country: "MX".to_owned(),
        currency_symbol: "USD".to_owned(),
    }
}

/// Renderer that records what the cart asked the UI to do.
#[derive(Default, Clone)]
pub struct RecordingRenderer {
    inner: Arc<Mutex<RendererLog>>,
}

#[derive(Default)]
struct RendererLog {
    views: Vec<CartView>,
    counts: Vec<u64>,
    opened: usize,
}

impl RecordingRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently rendered view.
    #[must_use]
    pub fn last_view(&self) -> Option<CartView> {
        self.inner.lock().expect("renderer log").views.last().cloned()
    }

    /// The most recently published count-badge value.
    #[must_use]
    pub fn last_count(&self) -> Option<u64> {
        self.inner.lock().expect("renderer log").counts.last().copied()
    }

    /// How many times the cart panel was opened.
    #[must_use]
    pub fn opened(&self) -> usize {
        self.inner.lock().expect("renderer log").opened
    }
}

impl CartRenderer for RecordingRenderer {
    fn render(&mut self, view: &CartView) {
        self.inner.lock().expect("renderer log").views.push(view.clone());
    }

    fn set_count(&mut self, count: u64) {
        self.inner.lock().expect("renderer log").counts.push(count);
    }

    fn open_cart(&mut self) {
        self.inner.lock().expect("renderer log").opened += 1;
    }

    fn close_cart(&mut self) {}
}

/// Navigator that records redirects and URL replacements.
#[derive(Default, Clone)]
pub struct RecordingNavigator {
    inner: Arc<Mutex<NavigatorLog>>,
}

#[derive(Default)]
struct NavigatorLog {
    assigned: Vec<Url>,
    replaced: Vec<Url>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The last full-page navigation target.
    #[must_use]
    pub fn last_assigned(&self) -> Option<Url> {
        self.inner.lock().expect("navigator log").assigned.last().cloned()
    }

    /// The last non-reloading URL replacement (the visible address bar).
    #[must_use]
    pub fn last_replaced(&self) -> Option<Url> {
        self.inner.lock().expect("navigator log").replaced.last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn assign(&mut self, url: &Url) {
        self.inner.lock().expect("navigator log").assigned.push(url.clone());
    }

    fn replace(&mut self, url: &Url) {
        self.inner.lock().expect("navigator log").replaced.push(url.clone());
    }
}
