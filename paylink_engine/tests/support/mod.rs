#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use paylink_engine::{
    db_types::{TxHash, WalletAddress},
    traits::{ChainReader, ChainReaderError, ChainReceipt, ChainTransaction, WebhookDelivery, WebhookSender},
    test_utils::prepare_env::{prepare_test_env, random_db_path},
    SqliteDatabase,
};
use serde_json::Value;

pub const MERCHANT: &str = "0x52908400098527886e0f7030069857d2e4169ee7";
pub const PAYER: &str = "0x8617e340b3d01fa5f11f306f4090fd50e238070d";

pub async fn new_database() -> SqliteDatabase {
    prepare_test_env(&random_db_path()).await
}

pub fn tx_hash(n: u8) -> String {
    format!("0x{}", hex::encode([n; 32]))
}

/// A chain reader that returns canned answers.
pub enum StubChain {
    /// The transaction was mined and succeeded, sent by the given address
    Confirmed(&'static str),
    Unknown,
    Reverted,
    Unreachable,
}

#[async_trait]
impl ChainReader for StubChain {
    async fn fetch_transaction(&self, tx_hash: &TxHash) -> Result<Option<ChainTransaction>, ChainReaderError> {
        let from = match self {
            StubChain::Confirmed(from) => *from,
            StubChain::Reverted => MERCHANT,
            StubChain::Unknown => return Ok(None),
            StubChain::Unreachable => return Err(ChainReaderError::RpcError("connection refused".into())),
        };
        Ok(Some(ChainTransaction {
            hash: tx_hash.clone(),
            from: from.parse::<WalletAddress>().unwrap(),
            block_number: Some(1234),
        }))
    }

    async fn fetch_receipt(&self, tx_hash: &TxHash) -> Result<Option<ChainReceipt>, ChainReaderError> {
        match self {
            StubChain::Confirmed(from) => Ok(Some(ChainReceipt {
                hash: tx_hash.clone(),
                from: from.parse().unwrap(),
                succeeded: true,
                block_number: Some(1234),
            })),
            StubChain::Reverted => Ok(Some(ChainReceipt {
                hash: tx_hash.clone(),
                from: MERCHANT.parse().unwrap(),
                succeeded: false,
                block_number: Some(1234),
            })),
            StubChain::Unknown => Ok(None),
            StubChain::Unreachable => Err(ChainReaderError::RpcError("connection refused".into())),
        }
    }
}

/// Remembers every webhook it is asked to send and answers with a fixed outcome.
#[derive(Clone)]
pub struct RecordingWebhooks {
    pub sent: Arc<Mutex<Vec<(String, Value)>>>,
    pub outcome: WebhookDelivery,
}

impl RecordingWebhooks {
    pub fn accepting() -> Self {
        Self::with_outcome(WebhookDelivery::delivered(200, serde_json::json!({"received": true})))
    }

    pub fn with_outcome(outcome: WebhookDelivery) -> Self {
        Self { sent: Arc::new(Mutex::new(Vec::new())), outcome }
    }

    pub fn sent(&self) -> Vec<(String, Value)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebhookSender for RecordingWebhooks {
    async fn send(&self, url: &str, payload: &Value) -> WebhookDelivery {
        self.sent.lock().unwrap().push((url.to_string(), payload.clone()));
        self.outcome.clone()
    }
}
