//! Read-only access to the payment contract's chain over JSON-RPC.
//!
//! [`EthersChainReader`] is the production [`ChainReader`]. It never signs anything; products and payments are
//! written to the contract by the merchant's and payer's own wallets.
use std::str::FromStr;

use async_trait::async_trait;
use ethers::{
    providers::{Http, Middleware, Provider},
    types::{Address, H256, U64},
};
use log::*;

use crate::{
    db_types::{TxHash, WalletAddress},
    traits::{ChainReader, ChainReaderError, ChainReceipt, ChainTransaction},
};

#[derive(Debug, Clone)]
pub struct EthersChainReader {
    provider: Provider<Http>,
    contract_address: WalletAddress,
}

impl EthersChainReader {
    /// Binds a reader to the RPC endpoint and checks that it is usable: the node must answer a block-number query
    /// and there must be contract code deployed at `contract_address`.
    pub async fn connect(rpc_url: &str, contract_address: &str) -> Result<Self, ChainReaderError> {
        let contract_address = WalletAddress::from_str(contract_address)
            .map_err(|e| ChainReaderError::ConfigurationError(e.to_string()))?;
        let provider = Provider::<Http>::try_from(rpc_url)
            .map_err(|e| ChainReaderError::ConfigurationError(format!("Invalid RPC URL {rpc_url}. {e}")))?;
        let block = provider.get_block_number().await.map_err(|e| ChainReaderError::RpcError(e.to_string()))?;
        info!("⛓️ Connected to RPC node at {rpc_url}. Latest block: {block}");
        let address = to_ethers_address(&contract_address)?;
        let code = provider.get_code(address, None).await.map_err(|e| ChainReaderError::RpcError(e.to_string()))?;
        if code.is_empty() {
            return Err(ChainReaderError::ConfigurationError(format!(
                "No contract code deployed at {contract_address}"
            )));
        }
        info!("⛓️ Payment contract found at {contract_address}");
        Ok(Self { provider, contract_address })
    }

    pub fn contract_address(&self) -> &WalletAddress {
        &self.contract_address
    }
}

#[async_trait]
impl ChainReader for EthersChainReader {
    async fn fetch_transaction(&self, tx_hash: &TxHash) -> Result<Option<ChainTransaction>, ChainReaderError> {
        let hash = to_h256(tx_hash)?;
        let tx = self.provider.get_transaction(hash).await.map_err(|e| ChainReaderError::RpcError(e.to_string()))?;
        trace!("⛓️ Transaction lookup for {tx_hash}: found = {}", tx.is_some());
        tx.map(|tx| {
            Ok(ChainTransaction {
                hash: from_h256(tx.hash)?,
                from: from_ethers_address(tx.from)?,
                block_number: tx.block_number.map(|n| n.as_u64()),
            })
        })
        .transpose()
    }

    async fn fetch_receipt(&self, tx_hash: &TxHash) -> Result<Option<ChainReceipt>, ChainReaderError> {
        let hash = to_h256(tx_hash)?;
        let receipt = self
            .provider
            .get_transaction_receipt(hash)
            .await
            .map_err(|e| ChainReaderError::RpcError(e.to_string()))?;
        trace!("⛓️ Receipt lookup for {tx_hash}: found = {}", receipt.is_some());
        receipt
            .map(|r| {
                Ok(ChainReceipt {
                    hash: from_h256(r.transaction_hash)?,
                    from: from_ethers_address(r.from)?,
                    succeeded: r.status == Some(U64::from(1u64)),
                    block_number: r.block_number.map(|n| n.as_u64()),
                })
            })
            .transpose()
    }
}

fn to_h256(tx_hash: &TxHash) -> Result<H256, ChainReaderError> {
    H256::from_str(tx_hash.as_str()).map_err(|e| ChainReaderError::InvalidResponse(e.to_string()))
}

fn from_h256(hash: H256) -> Result<TxHash, ChainReaderError> {
    TxHash::from_str(&format!("{hash:#x}")).map_err(|e| ChainReaderError::InvalidResponse(e.to_string()))
}

fn to_ethers_address(address: &WalletAddress) -> Result<Address, ChainReaderError> {
    Address::from_str(address.as_str()).map_err(|e| ChainReaderError::ConfigurationError(e.to_string()))
}

fn from_ethers_address(address: Address) -> Result<WalletAddress, ChainReaderError> {
    WalletAddress::from_str(&format!("{address:#x}")).map_err(|e| ChainReaderError::InvalidResponse(e.to_string()))
}
