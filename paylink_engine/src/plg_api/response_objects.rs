//! Public views of the stored records, as returned to API clients.
//!
//! None of these expose the internal database row id.
use chrono::{DateTime, Utc};
use paylink_common::TokenAmount;
use serde::{Deserialize, Serialize};

use crate::db_types::{
    Merchant,
    OnChainProductId,
    Product,
    ProductId,
    Transaction,
    TransactionStatus,
    TxHash,
    TxRef,
    WalletAddress,
};

pub const UNKNOWN_PRODUCT: &str = "Unknown Product";

//--------------------------------------       Merchants       ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantSummary {
    pub wallet_address: WalletAddress,
    pub webhook_url: Option<String>,
    pub is_active: bool,
}

impl From<Merchant> for MerchantSummary {
    fn from(m: Merchant) -> Self {
        Self { wallet_address: m.wallet_address, webhook_url: m.webhook_url, is_active: m.is_active }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantDetails {
    pub wallet_address: WalletAddress,
    pub webhook_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Merchant> for MerchantDetails {
    fn from(m: Merchant) -> Self {
        Self {
            wallet_address: m.wallet_address,
            webhook_url: m.webhook_url,
            is_active: m.is_active,
            created_at: m.created_at,
        }
    }
}

/// The result of an onboarding call. `created` is false when the merchant already existed.
#[derive(Debug, Clone, PartialEq)]
pub struct OnboardOutcome {
    pub merchant: MerchantSummary,
    pub created: bool,
}

//--------------------------------------       Products        ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedProduct {
    pub product_id: ProductId,
    pub name: String,
    pub price: TokenAmount,
    /// The absolute payment page URL.
    pub shareable_link: String,
    pub is_active: bool,
}

impl CreatedProduct {
    pub fn new(product: Product, frontend_url: &str) -> Self {
        Self {
            shareable_link: product.shareable_link.to_url(frontend_url),
            product_id: product.product_id,
            name: product.name,
            price: product.price,
            is_active: product.is_active,
        }
    }
}

/// A product as the owning merchant sees it in their dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListing {
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
    pub image_link: String,
    pub price: TokenAmount,
    pub token_address: Option<WalletAddress>,
    pub is_active: bool,
    pub shareable_link: String,
    pub created_at: DateTime<Utc>,
}

impl ProductListing {
    pub fn new(product: Product, frontend_url: &str) -> Self {
        Self {
            shareable_link: product.shareable_link.to_url(frontend_url),
            product_id: product.product_id,
            name: product.name,
            description: product.description,
            image_link: product.image_link,
            price: product.price,
            token_address: product.token_address,
            is_active: product.is_active,
            created_at: product.created_at,
        }
    }
}

/// What a payer sees when opening a payment link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProduct {
    pub product_id: ProductId,
    pub on_chain_product_id: OnChainProductId,
    pub name: String,
    pub description: String,
    pub image_link: String,
    pub price: TokenAmount,
    pub token_address: Option<WalletAddress>,
    pub merchant_address: WalletAddress,
}

impl From<Product> for PublicProduct {
    fn from(p: Product) -> Self {
        Self {
            product_id: p.product_id,
            on_chain_product_id: p.on_chain_product_id,
            name: p.name,
            description: p.description,
            image_link: p.image_link,
            price: p.price,
            token_address: p.token_address,
            merchant_address: p.merchant_address,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedProduct {
    pub product_id: ProductId,
    pub name: String,
    pub price: TokenAmount,
    pub is_active: bool,
}

impl From<Product> for UpdatedProduct {
    fn from(p: Product) -> Self {
        Self { product_id: p.product_id, name: p.name, price: p.price, is_active: p.is_active }
    }
}

//--------------------------------------     Transactions      ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedTransaction {
    pub tx_hash: TxHash,
    pub tx_ref: TxRef,
    pub status: TransactionStatus,
}

impl From<Transaction> for RecordedTransaction {
    fn from(tx: Transaction) -> Self {
        Self { tx_hash: tx.tx_hash, tx_ref: tx.tx_ref, status: tx.status }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListing {
    pub tx_hash: TxHash,
    pub tx_ref: TxRef,
    pub product_id: ProductId,
    pub product_name: String,
    pub payer_address: WalletAddress,
    pub amount: TokenAmount,
    pub token_address: Option<WalletAddress>,
    pub status: TransactionStatus,
    pub block_number: Option<i64>,
    pub webhook_sent: bool,
    pub created_at: DateTime<Utc>,
}

impl TransactionListing {
    pub fn new(tx: Transaction, product_name: Option<String>) -> Self {
        Self {
            tx_hash: tx.tx_hash,
            tx_ref: tx.tx_ref,
            product_id: tx.product_id,
            product_name: product_name.unwrap_or_else(|| UNKNOWN_PRODUCT.to_string()),
            payer_address: tx.payer_address,
            amount: tx.amount,
            token_address: tx.token_address,
            status: tx.status,
            block_number: tx.block_number,
            webhook_sent: tx.webhook_sent,
            created_at: tx.created_at,
        }
    }
}

/// The product fields resolved alongside a single transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionProduct {
    pub name: String,
    pub description: String,
    pub image_link: String,
}

impl From<Product> for TransactionProduct {
    fn from(p: Product) -> Self {
        Self { name: p.name, description: p.description, image_link: p.image_link }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetails {
    pub tx_hash: TxHash,
    pub tx_ref: TxRef,
    pub product_id: ProductId,
    pub product_name: String,
    pub product: Option<TransactionProduct>,
    pub merchant_address: WalletAddress,
    pub payer_address: WalletAddress,
    pub amount: TokenAmount,
    pub token_address: Option<WalletAddress>,
    pub status: TransactionStatus,
    pub block_number: Option<i64>,
    pub webhook_sent: bool,
    pub created_at: DateTime<Utc>,
}

impl TransactionDetails {
    pub fn new(tx: Transaction, product: Option<Product>) -> Self {
        let product = product.map(TransactionProduct::from);
        Self {
            product_name: product.as_ref().map(|p| p.name.clone()).unwrap_or_else(|| UNKNOWN_PRODUCT.to_string()),
            product,
            tx_hash: tx.tx_hash,
            tx_ref: tx.tx_ref,
            product_id: tx.product_id,
            merchant_address: tx.merchant_address,
            payer_address: tx.payer_address,
            amount: tx.amount,
            token_address: tx.token_address,
            status: tx.status,
            block_number: tx.block_number,
            webhook_sent: tx.webhook_sent,
            created_at: tx.created_at,
        }
    }
}
