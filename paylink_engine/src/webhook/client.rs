use std::time::Duration;

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use log::*;
use paylink_common::Secret;
use reqwest::{header::CONTENT_TYPE, Client};
use serde_json::Value;
use sha2::Sha256;
use thiserror::Error;

use crate::traits::{WebhookDelivery, WebhookSender};

type HmacSha256 = Hmac<Sha256>;

/// Carries the hex HMAC-SHA256 of the request body when a signing secret is configured.
pub const SIGNATURE_HEADER: &str = "X-Paylink-Signature";

#[derive(Debug, Clone, Error)]
pub enum WebhookError {
    #[error("Could not build the webhook HTTP client. {0}")]
    ClientError(String),
    #[error("Invalid webhook signing key. {0}")]
    InvalidSigningKey(String),
}

/// Computes the hex-encoded HMAC-SHA256 of `body` under `secret`.
pub fn compute_signature(secret: &[u8], body: &[u8]) -> Result<String, WebhookError> {
    let mut mac = HmacSha256::new_from_slice(secret).map_err(|e| WebhookError::InvalidSigningKey(e.to_string()))?;
    mac.update(body);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// The production [`WebhookSender`], backed by `reqwest`.
#[derive(Clone)]
pub struct WebhookClient {
    client: Client,
    signing_secret: Option<Secret<String>>,
}

impl WebhookClient {
    pub fn new(timeout: Duration, signing_secret: Option<Secret<String>>) -> Result<Self, WebhookError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| WebhookError::ClientError(e.to_string()))?;
        Ok(Self { client, signing_secret })
    }

    async fn post(&self, url: &str, payload: &Value) -> Result<WebhookDelivery, WebhookError> {
        let body = serde_json::to_vec(payload).map_err(|e| WebhookError::ClientError(e.to_string()))?;
        let mut request = self.client.post(url).header(CONTENT_TYPE, "application/json");
        if let Some(secret) = &self.signing_secret {
            let signature = compute_signature(secret.reveal().as_bytes(), &body)?;
            request = request.header(SIGNATURE_HEADER, signature);
        }
        let delivery = match request.body(body).send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    let text = response.text().await.unwrap_or_default();
                    let data = serde_json::from_str(&text).unwrap_or(Value::String(text));
                    WebhookDelivery::delivered(status.as_u16(), data)
                } else {
                    let code = status.as_u16();
                    WebhookDelivery::failed(code, format!("Request failed with status code {code}"))
                }
            },
            Err(e) => WebhookDelivery::failed(e.status().map(|s| s.as_u16()).unwrap_or(500), e.to_string()),
        };
        Ok(delivery)
    }
}

#[async_trait]
impl WebhookSender for WebhookClient {
    async fn send(&self, url: &str, payload: &Value) -> WebhookDelivery {
        debug!("📮️ Sending webhook to {url}");
        let delivery = self.post(url, payload).await.unwrap_or_else(|e| WebhookDelivery::failed(500, e.to_string()));
        if delivery.success {
            info!("📮️ Webhook delivered to {url} with status {}", delivery.status);
        } else {
            warn!(
                "📮️ Webhook delivery to {url} failed. Status {}. {}",
                delivery.status,
                delivery.error.as_deref().unwrap_or_default()
            );
        }
        delivery
    }
}
