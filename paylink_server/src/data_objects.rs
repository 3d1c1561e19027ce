use chrono::{DateTime, Utc};
use paylink_engine::response_objects::{
    CreatedProduct,
    MerchantSummary,
    RecordedTransaction,
    UpdatedProduct,
};
use serde::{Deserialize, Serialize};

/// Whether the server was able to reach the payment contract at startup. This never changes while the server runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainStatus {
    pub contract_initialized: bool,
    pub contract_address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub contract_initialized: bool,
    pub contract_address: Option<String>,
}

impl HealthResponse {
    pub fn ok(chain: &ChainStatus) -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            contract_initialized: chain.contract_initialized,
            contract_address: chain.contract_address.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardResponse {
    pub message: String,
    pub merchant: MerchantSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookUpdateResponse {
    pub message: String,
    pub webhook_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreatedResponse {
    pub message: String,
    pub product: CreatedProduct,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdatedResponse {
    pub message: String,
    pub product: UpdatedProduct,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecordedResponse {
    pub message: String,
    pub transaction: RecordedTransaction,
}
