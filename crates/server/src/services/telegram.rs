//! Telegram Bot API client for fan-ID notifications.
//!
//! The storefront forwards fan-ID submissions to a staff chat. Delivery is
//! best-effort: the caller fires a task and moves on, and failures surface
//! only in the logs.

use reqwest::header::{HeaderMap, HeaderValue};
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;

use crate::config::TelegramConfig;

/// Telegram Bot API base URL.
const BASE_URL: &str = "https://api.telegram.org";

/// Errors that can occur when relaying a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Telegram Bot API client.
#[derive(Clone)]
pub struct TelegramNotifier {
    client: reqwest::Client,
    bot_token: secrecy::SecretString,
    chat_id: String,
}

/// `sendMessage` response envelope; `ok: false` carries a description.
#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramNotifier {
    /// Create a new notifier from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &TelegramConfig) -> Result<Self, NotifyError> {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            bot_token: config.bot_token.clone(),
            chat_id: config.chat_id.clone(),
        })
    }

    /// Send an HTML-formatted message to the configured chat.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the API reports `ok: false`.
    pub async fn send_message(&self, text: &str) -> Result<(), NotifyError> {
        let url = format!(
            "{BASE_URL}/bot{}/sendMessage",
            self.bot_token.expose_secret()
        );

        let body = serde_json::json!({
            "chat_id": self.chat_id,
            "text": text,
            "parse_mode": "HTML",
        });

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NotifyError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let api_response: SendMessageResponse = response.json().await?;
        if !api_response.ok {
            return Err(NotifyError::Api {
                status: status.as_u16(),
                message: api_response.description.unwrap_or_default(),
            });
        }

        Ok(())
    }
}

/// Format the fan-ID submission message.
#[must_use]
pub fn fan_id_message(session_id: &str, fan_id: &str, cart_total: Decimal) -> String {
    format!(
        "\u{1f3ab} <b>New Fan ID submitted</b>\n\
         Fan ID: <code>{fan_id}</code>\n\
         Session: <code>{session_id}</code>\n\
         Cart total: ${cart_total:.2} USD"
    )
}
