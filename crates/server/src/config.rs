//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CART_DATABASE_URL` - `PostgreSQL` connection string; falls back to
//!   `DATABASE_URL`, and to the in-memory store when neither is set
//! - `CART_HOST` - Bind address (default: 127.0.0.1)
//! - `CART_PORT` - Listen port (default: 3000)
//! - `CART_MERGE_POLICY` - `id` or `title-category` (default: id)
//! - `TELEGRAM_BOT_TOKEN` / `TELEGRAM_CHAT_ID` - fan-ID notification relay;
//!   both must be set for notifications to be sent
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};

use goal_tickets_core::MergePolicy;
use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` connection URL; `None` selects the in-memory store
    pub database_url: Option<SecretString>,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Merge rule applied on the add path
    pub merge_policy: MergePolicy,
    /// Telegram relay for fan-ID notifications
    pub telegram: Option<TelegramConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Telegram Bot API configuration.
///
/// Implements `Debug` manually to redact the bot token.
#[derive(Clone)]
pub struct TelegramConfig {
    /// Bot token (the secret half of the `bot<token>/sendMessage` path)
    pub bot_token: SecretString,
    /// Chat the notifications are delivered to
    pub chat_id: String,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"[REDACTED]")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url();
        let host = get_env_or_default("CART_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("CART_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("CART_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("CART_PORT".to_string(), e.to_string()))?;
        let merge_policy = get_env_or_default("CART_MERGE_POLICY", "id")
            .parse::<MergePolicy>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CART_MERGE_POLICY".to_string(), e.to_string())
            })?;

        let telegram = TelegramConfig::from_env();
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            database_url,
            host,
            port,
            merge_policy,
            telegram,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl TelegramConfig {
    /// Both variables must be present; a half-configured relay is treated as
    /// no relay at all.
    fn from_env() -> Option<Self> {
        let bot_token = get_optional_env("TELEGRAM_BOT_TOKEN")?;
        let chat_id = get_optional_env("TELEGRAM_CHAT_ID")?;
        Some(Self {
            bot_token: SecretString::from(bot_token),
            chat_id,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get the database URL with fallback to generic `DATABASE_URL`.
fn get_database_url() -> Option<SecretString> {
    std::env::var("CART_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
        .map(SecretString::from)
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            database_url: None,
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            merge_policy: MergePolicy::ById,
            telegram: None,
            sentry_dsn: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_telegram_config_debug_redacts_token() {
        let config = TelegramConfig {
            bot_token: SecretString::from("7991516405:very-secret-token"),
            chat_id: "-4898281592".to_string(),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(debug_output.contains("-4898281592"));
        assert!(!debug_output.contains("very-secret-token"));
    }
}
