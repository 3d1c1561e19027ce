use chrono::{DateTime, Utc};
use paylink_common::TokenAmount;
use serde::{Deserialize, Serialize};

use crate::db_types::{ProductId, Transaction, TxHash, TxRef, WalletAddress};

pub const PAYMENT_SUCCESS_EVENT: &str = "payment.success";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSuccessPayload {
    pub event: String,
    pub transaction: WebhookTransaction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookTransaction {
    pub tx_hash: TxHash,
    pub tx_ref: TxRef,
    pub product_id: ProductId,
    pub product_name: String,
    pub payer_address: WalletAddress,
    pub amount: TokenAmount,
    pub token_address: Option<WalletAddress>,
    pub block_number: Option<i64>,
    pub timestamp: DateTime<Utc>,
}

impl PaymentSuccessPayload {
    pub fn new(transaction: &Transaction, product_name: &str) -> Self {
        Self {
            event: PAYMENT_SUCCESS_EVENT.to_string(),
            transaction: WebhookTransaction {
                tx_hash: transaction.tx_hash.clone(),
                tx_ref: transaction.tx_ref.clone(),
                product_id: transaction.product_id.clone(),
                product_name: product_name.to_string(),
                payer_address: transaction.payer_address.clone(),
                amount: transaction.amount.clone(),
                token_address: transaction.token_address.clone(),
                block_number: transaction.block_number,
                timestamp: transaction.created_at,
            },
        }
    }
}
