//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Instant;

use crate::config::ServerConfig;
use crate::services::telegram::TelegramNotifier;
use crate::store::CartStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// cart store, the optional notification relay, and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    store: Arc<dyn CartStore>,
    notifier: Option<TelegramNotifier>,
    started_at: Instant,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(
        config: ServerConfig,
        store: Arc<dyn CartStore>,
        notifier: Option<TelegramNotifier>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                notifier,
                started_at: Instant::now(),
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn CartStore> {
        &self.inner.store
    }

    /// Get a reference to the notification relay, if configured.
    #[must_use]
    pub fn notifier(&self) -> Option<&TelegramNotifier> {
        self.inner.notifier.as_ref()
    }

    /// Seconds since this process started serving (health endpoint).
    #[must_use]
    pub fn uptime_secs(&self) -> u64 {
        self.inner.started_at.elapsed().as_secs()
    }
}
