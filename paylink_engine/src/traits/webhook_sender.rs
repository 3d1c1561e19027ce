use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The outcome of a single webhook POST. This is what gets stored (as JSON) on the transaction record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookDelivery {
    pub success: bool,
    /// The HTTP status returned by the merchant, or 500 if no response was received.
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WebhookDelivery {
    pub fn delivered(status: u16, data: Value) -> Self {
        Self { success: true, status, data: Some(data), error: None }
    }

    pub fn failed<S: Into<String>>(status: u16, error: S) -> Self {
        Self { success: false, status, data: None, error: Some(error.into()) }
    }
}

/// Delivers a JSON payload to a merchant endpoint. Delivery is attempted exactly once and never fails outright: any
/// problem is reported in the returned [`WebhookDelivery`].
#[async_trait]
pub trait WebhookSender: Send + Sync {
    async fn send(&self, url: &str, payload: &Value) -> WebhookDelivery;
}
