//! Goal Tickets Cart Server.
//!
//! Serves the session-scoped cart API on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework over tokio
//! - Cart documents keyed by session id, in `PostgreSQL` (JSONB) or in
//!   memory when no database URL is configured
//! - Fan-ID submissions relayed to a Telegram chat, fire-and-forget
//!
//! Static pages, templating, and payment collection live elsewhere; this
//! binary only speaks the JSON cart protocol.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use goal_tickets_server::config::ServerConfig;
use goal_tickets_server::services::telegram::TelegramNotifier;
use goal_tickets_server::state::AppState;
use goal_tickets_server::store::{CartStore, MemoryStore, PgCartStore};
use goal_tickets_server::{app, db};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ServerConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = ServerConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Initialize tracing with EnvFilter and Sentry integration
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "goal_tickets_server=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    // Select the cart store backend
    let store: Arc<dyn CartStore> = match &config.database_url {
        Some(database_url) => {
            let pool = db::create_pool(database_url)
                .await
                .expect("Failed to create database pool");
            tracing::info!("Database pool created");

            // NOTE: Migrations are NOT run automatically on startup.
            // Run them explicitly via: cargo run -p goal-tickets-cli -- migrate
            Arc::new(PgCartStore::new(pool, config.merge_policy))
        }
        None => {
            tracing::warn!("No database URL configured, using in-memory cart store");
            Arc::new(MemoryStore::new(config.merge_policy))
        }
    };

    // Notification relay is optional; a missing token just drops messages
    let notifier = config.telegram.as_ref().map(|telegram| {
        TelegramNotifier::new(telegram).expect("Failed to build notification client")
    });

    // Build application state and router
    let state = AppState::new(config.clone(), store, notifier);
    let app = app(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    // Start server
    let addr = config.socket_addr();
    tracing::info!("cart server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
