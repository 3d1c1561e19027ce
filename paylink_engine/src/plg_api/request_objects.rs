//! Request bodies for the payment-link APIs.
//!
//! Every field is optional at the wire level so that a missing field is reported with the same message the API
//! documents, instead of a generic deserialization error.
use paylink_common::AmountInput;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardMerchantRequest {
    pub wallet_address: Option<String>,
    pub webhook_url: Option<String>,
    /// EIP-191 signature over the onboarding message. Only checked when ownership proofs are required.
    pub signature: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWebhookRequest {
    pub webhook_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub merchant_address: Option<String>,
    pub product_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_link: Option<String>,
    pub price: Option<AmountInput>,
    pub token_address: Option<String>,
    pub on_chain_product_id: Option<String>,
    pub tx_hash: Option<String>,
    pub block_number: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub price: Option<AmountInput>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordTransactionRequest {
    pub tx_hash: Option<String>,
    pub product_id: Option<String>,
    pub payer_address: Option<String>,
    pub amount: Option<AmountInput>,
    pub token_address: Option<String>,
    pub block_number: Option<i64>,
}
