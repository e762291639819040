//! Backend API client for order records and order creation.
//!
//! Two endpoints on the EverIntent backend are consumed:
//! - `GET /orders/{token}` - the order-record store, consulted read-only
//!   when a resume token is present in the checkout URL.
//! - `POST /orders` - the order-creation function, invoked once per
//!   submission with the full order payload.
//!
//! This client never writes to the record it resumes from; abandoned-order
//! cleanup is the backend's job.

use everintent_core::{OrderStatus, ResumeToken};
use reqwest::header::{HeaderMap, HeaderValue};
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::config::BackendConfig;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// No order record exists for the given resume token.
    #[error("order record not found: {0}")]
    RecordNotFound(ResumeToken),

    /// Failed to parse a response or build the client.
    #[error("parse error: {0}")]
    Parse(String),
}

/// A resumable order record as stored by the backend.
///
/// Every field apart from `id` and `status` is optional: abandoned checkouts
/// are saved at whatever point the buyer stopped. Add-ons arrive as raw
/// slugs and are filtered against the static catalog during hydration.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRecord {
    pub id: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub selected_tier: Option<String>,
    #[serde(default)]
    pub addons: Vec<RecordAddon>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub has_domain: Option<bool>,
    #[serde(default)]
    pub domain_name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub tcpa_consent: Option<bool>,
    #[serde(default)]
    pub utm_source: Option<String>,
    #[serde(default)]
    pub utm_medium: Option<String>,
    #[serde(default)]
    pub utm_campaign: Option<String>,
}

/// One add-on entry on a stored order record.
///
/// The backend stores more fields per add-on; only the slug matters for
/// hydration, so everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordAddon {
    pub slug: String,
}

/// The order-creation request payload.
///
/// Field names are the backend's, not this service's; do not rename.
#[derive(Debug, Clone, Serialize)]
pub struct OrderPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub business_name: String,
    pub has_domain: bool,
    pub domain_name: String,
    pub message: String,
    pub selected_tier: String,
    pub addons: Vec<PayloadAddon>,
    pub monthly_total: Decimal,
    pub setup_total: Decimal,
    pub tcpa_consent: bool,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub source_page: String,
    pub user_agent: String,
}

/// One add-on entry on the order-creation payload.
#[derive(Debug, Clone, Serialize)]
pub struct PayloadAddon {
    pub slug: String,
    pub name: String,
    #[serde(rename = "monthlyPrice")]
    pub monthly_price: Decimal,
    #[serde(rename = "ghlTag")]
    pub ghl_tag: String,
}

/// The order-creation response.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderCreationResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub redirect_url: Option<String>,
}

/// Client for the EverIntent backend API.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.api_key.expose_secret());
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&auth_value)
                .map_err(|e| BackendError::Parse(format!("Invalid API key format: {e}")))?,
        );
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(BackendClientInner {
                client,
                base_url: config.base_url.trim_end_matches('/').to_string(),
            }),
        })
    }

    /// Fetch the order record for a resume token.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::RecordNotFound`] for a 404, or an error for
    /// any other non-success status or transport failure. Status checking
    /// (only `pending` is resumable) is the caller's concern.
    pub async fn fetch_order_record(
        &self,
        token: &ResumeToken,
    ) -> Result<OrderRecord, BackendError> {
        let url = format!(
            "{}/orders/{}",
            self.inner.base_url,
            urlencoding::encode(token.as_str())
        );

        let response = self.inner.client.get(&url).send().await?;
        let status = response.status();

        if status.as_u16() == 404 {
            return Err(BackendError::RecordNotFound(token.clone()));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))
    }

    /// Create an order from a finished checkout.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-success HTTP status. A
    /// `success: false` body is NOT an error at this layer; the submission
    /// gateway interprets it.
    pub async fn create_order(
        &self,
        payload: &OrderPayload,
    ) -> Result<OrderCreationResponse, BackendError> {
        let url = format!("{}/orders", self.inner.base_url);

        let response = self.inner.client.post(&url).json(payload).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))
    }

    /// Base URL this client talks to. Used by the readiness probe.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_record_parses_sparse_row() {
        // Abandoned-at-step-1 records carry little more than a status.
        let json = r#"{"id": "ord_123", "status": "pending"}"#;
        let record: OrderRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "ord_123");
        assert!(record.status.is_resumable());
        assert!(record.addons.is_empty());
        assert!(record.selected_tier.is_none());
    }

    #[test]
    fn test_order_record_ignores_extra_addon_fields() {
        let json = r#"{
            "id": "ord_456",
            "status": "pending",
            "addons": [{"slug": "ai-voice-chat", "name": "AI Voice + Chat", "monthlyPrice": 79}]
        }"#;
        let record: OrderRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.addons.len(), 1);
        assert_eq!(record.addons.first().unwrap().slug, "ai-voice-chat");
    }

    #[test]
    fn test_payload_wire_names() {
        let payload = PayloadAddon {
            slug: "ai-voice-chat".to_string(),
            name: "AI Voice + Chat".to_string(),
            monthly_price: Decimal::from(79),
            ghl_tag: "addon-ai-voice-chat".to_string(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["monthlyPrice"], "79");
        assert_eq!(json["ghlTag"], "addon-ai-voice-chat");
    }

    #[test]
    fn test_creation_response_defaults() {
        let response: OrderCreationResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(response.success);
        assert!(response.error.is_none());
        assert!(response.redirect_url.is_none());
    }
}
