use async_trait::async_trait;
use thiserror::Error;

use crate::db_types::{TxHash, WalletAddress};

#[derive(Debug, Clone, Error)]
pub enum ChainReaderError {
    #[error("Could not reach the RPC node. {0}")]
    RpcError(String),
    #[error("Invalid chain reader configuration. {0}")]
    ConfigurationError(String),
    #[error("The RPC node returned data that could not be interpreted. {0}")]
    InvalidResponse(String),
}

/// The parts of an on-chain transaction the gateway cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainTransaction {
    pub hash: TxHash,
    pub from: WalletAddress,
    pub block_number: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainReceipt {
    pub hash: TxHash,
    pub from: WalletAddress,
    /// `true` if the receipt reports a successful execution (status `1`).
    pub succeeded: bool,
    pub block_number: Option<u64>,
}

/// A read-only view of the chain. Nothing in the gateway signs or submits transactions; merchants and payers do that
/// from their own wallets.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Fetches the transaction with the given hash, or `None` if the node does not know it.
    async fn fetch_transaction(&self, tx_hash: &TxHash) -> Result<Option<ChainTransaction>, ChainReaderError>;

    /// Fetches the receipt for the given hash, or `None` if the transaction has not been mined.
    async fn fetch_receipt(&self, tx_hash: &TxHash) -> Result<Option<ChainReceipt>, ChainReaderError>;
}
