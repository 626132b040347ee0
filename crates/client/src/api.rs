//! HTTP wrapper over the cart API.
//!
//! Thin typed calls mirroring the server routes; every mutation returns the
//! full authoritative cart. Responses are judged by their `success` flag,
//! matching how the storefront has always consumed this API.

use goal_tickets_core::{CartItem, ItemId, SessionId};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use url::Url;

use crate::error::ClientError;

/// Cart API client bound to one server base URL.
#[derive(Clone)]
pub struct CartApi {
    http: reqwest::Client,
    base_url: Url,
}

/// Response envelope shared by the cart endpoints.
#[derive(Debug, Deserialize)]
struct CartEnvelope {
    success: bool,
    #[serde(default)]
    cart: Vec<CartItem>,
}

impl CartEnvelope {
    fn into_items(self) -> Result<Vec<CartItem>, ClientError> {
        if self.success {
            Ok(self.cart)
        } else {
            Err(ClientError::Rejected)
        }
    }
}

impl CartApi {
    /// Create a client for the API at `base_url`.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path)?)
    }

    /// Fetch the session's cart.
    pub async fn fetch(&self, session: &SessionId) -> Result<Vec<CartItem>, ClientError> {
        let url = self.endpoint(&format!("api/cart/{session}"))?;
        let envelope: CartEnvelope = self.http.get(url).send().await?.json().await?;
        envelope.into_items()
    }

    /// Add an item to the session's cart.
    pub async fn add(
        &self,
        session: &SessionId,
        item: &CartItem,
    ) -> Result<Vec<CartItem>, ClientError> {
        let url = self.endpoint(&format!("api/cart/{session}/add"))?;
        let envelope: CartEnvelope = self.http.post(url).json(item).send().await?.json().await?;
        envelope.into_items()
    }

    /// Set a line's quantity.
    pub async fn set_quantity(
        &self,
        session: &SessionId,
        item: &ItemId,
        quantity: i64,
    ) -> Result<Vec<CartItem>, ClientError> {
        let url = self.endpoint(&format!("api/cart/{session}/update/{item}"))?;
        let body = serde_json::json!({ "quantity": quantity });
        let envelope: CartEnvelope = self.http.put(url).json(&body).send().await?.json().await?;
        envelope.into_items()
    }

    /// Remove a line.
    pub async fn remove(
        &self,
        session: &SessionId,
        item: &ItemId,
    ) -> Result<Vec<CartItem>, ClientError> {
        let url = self.endpoint(&format!("api/cart/{session}/remove/{item}"))?;
        let envelope: CartEnvelope = self.http.delete(url).send().await?.json().await?;
        envelope.into_items()
    }

    /// Clear the session's cart.
    pub async fn clear(&self, session: &SessionId) -> Result<Vec<CartItem>, ClientError> {
        let url = self.endpoint(&format!("api/cart/{session}"))?;
        let envelope: CartEnvelope = self.http.delete(url).send().await?.json().await?;
        envelope.into_items()
    }

    /// Report an applied fan ID; delivery downstream is fire-and-forget.
    pub async fn notify_fan_id(
        &self,
        session: &SessionId,
        fan_id: &str,
        cart_total: Decimal,
    ) -> Result<(), ClientError> {
        let url = self.endpoint("api/notify/fanid")?;
        // The endpoint speaks JSON numbers for the total, not decimal strings
        let body = serde_json::json!({
            "sessionId": session.as_str(),
            "fanId": fan_id,
            "cartTotal": cart_total.to_f64().unwrap_or_default(),
        });
        self.http.post(url).json(&body).send().await?;
        Ok(())
    }
}
