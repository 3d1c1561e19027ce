use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use paylink_common::TokenAmount;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

static ADDRESS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("valid regex"));
static HASH_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^0x[0-9a-fA-F]{64}$").expect("valid regex"));

#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct ConversionError(String);

macro_rules! deserialize_from_str {
    ($t:ty) => {
        impl<'de> Deserialize<'de> for $t {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where D: Deserializer<'de> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

//--------------------------------------     WalletAddress     ---------------------------------------------------------
/// An EVM account address. Addresses are always held in lowercase so that lookups never depend on the checksum
/// casing a wallet happened to report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Type, Serialize)]
#[sqlx(transparent)]
pub struct WalletAddress(String);

impl WalletAddress {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Case-insensitive comparison against an address in any casing.
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl FromStr for WalletAddress {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if ADDRESS_REGEX.is_match(s) {
            Ok(Self(s.to_ascii_lowercase()))
        } else {
            Err(ConversionError(format!("Invalid wallet address format: {s}")))
        }
    }
}

deserialize_from_str!(WalletAddress);

impl Display for WalletAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

//--------------------------------------        TxHash         ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Hash, Type, Serialize)]
#[sqlx(transparent)]
pub struct TxHash(String);

impl TxHash {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for TxHash {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if HASH_REGEX.is_match(s) {
            Ok(Self(s.to_ascii_lowercase()))
        } else {
            Err(ConversionError(format!("Invalid transaction hash: {s}")))
        }
    }
}

deserialize_from_str!(TxHash);

impl Display for TxHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

//--------------------------------------   OnChainProductId    ---------------------------------------------------------
/// The `bytes32` key that the payment contract uses for a product. See
/// [`crate::helpers::derive_on_chain_product_id`] for how it relates to the [`ProductId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Type, Serialize)]
#[sqlx(transparent)]
pub struct OnChainProductId(String);

impl OnChainProductId {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub(crate) fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(format!("0x{}", hex::encode(bytes)))
    }
}

impl FromStr for OnChainProductId {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if HASH_REGEX.is_match(s) {
            Ok(Self(s.to_ascii_lowercase()))
        } else {
            Err(ConversionError(format!("Invalid on-chain product id: {s}")))
        }
    }
}

deserialize_from_str!(OnChainProductId);

impl Display for OnChainProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

//--------------------------------------       ProductId       ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Hash, Type, Serialize)]
#[sqlx(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for ProductId {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            Err(ConversionError("Product id cannot be empty".to_string()))
        } else {
            Ok(Self(s.to_string()))
        }
    }
}

deserialize_from_str!(ProductId);

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

//--------------------------------------     ShareableLink     ---------------------------------------------------------
/// The short random token in a public payment URL (`<frontend>/pay/<token>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct ShareableLink(pub String);

impl ShareableLink {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Expands the token into an absolute payment page URL.
    pub fn to_url(&self, frontend_url: &str) -> String {
        format!("{}/pay/{}", frontend_url.trim_end_matches('/'), self.0)
    }
}

impl Display for ShareableLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

//--------------------------------------         TxRef         ---------------------------------------------------------
/// Internal payment reference, distinct from the transaction hash, that merchants can use for correlation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct TxRef(pub String);

impl TxRef {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for TxRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

//--------------------------------------   TransactionStatus   ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Reported by a client but not yet known to be final. Never written by the current payment flow.
    Pending,
    /// The payment was reported as confirmed on-chain.
    Completed,
    /// The payment was reverted or dropped. Never written by the current payment flow.
    Failed,
}

impl Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Pending => write!(f, "pending"),
            TransactionStatus::Completed => write!(f, "completed"),
            TransactionStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            s => Err(ConversionError(format!("Invalid transaction status: {s}"))),
        }
    }
}

//--------------------------------------       Merchant        ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Merchant {
    pub id: i64,
    pub wallet_address: WalletAddress,
    pub webhook_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMerchant {
    pub wallet_address: WalletAddress,
    pub webhook_url: Option<String>,
}

impl NewMerchant {
    pub fn new(wallet_address: WalletAddress) -> Self {
        Self { wallet_address, webhook_url: None }
    }
}

//--------------------------------------        Product        ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Product {
    pub id: i64,
    pub product_id: ProductId,
    pub merchant_address: WalletAddress,
    pub name: String,
    pub description: String,
    pub image_link: String,
    pub price: TokenAmount,
    pub token_address: Option<WalletAddress>,
    pub on_chain_product_id: OnChainProductId,
    pub is_active: bool,
    pub shareable_link: ShareableLink,
    pub creation_tx_hash: TxHash,
    pub creation_block_number: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub product_id: ProductId,
    pub merchant_address: WalletAddress,
    pub name: String,
    pub description: String,
    pub image_link: String,
    pub price: TokenAmount,
    pub token_address: Option<WalletAddress>,
    pub on_chain_product_id: OnChainProductId,
    pub shareable_link: ShareableLink,
    pub creation_tx_hash: TxHash,
    pub creation_block_number: Option<i64>,
}

/// The only product fields that may change after creation. Neither is pushed back to the contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductUpdate {
    pub price: Option<TokenAmount>,
    pub is_active: Option<bool>,
}

impl ProductUpdate {
    pub fn is_empty(&self) -> bool {
        self.price.is_none() && self.is_active.is_none()
    }
}

//--------------------------------------      Transaction      ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Transaction {
    pub id: i64,
    pub tx_hash: TxHash,
    pub tx_ref: TxRef,
    pub product_id: ProductId,
    pub merchant_address: WalletAddress,
    pub payer_address: WalletAddress,
    pub amount: TokenAmount,
    pub token_address: Option<WalletAddress>,
    pub status: TransactionStatus,
    pub block_number: Option<i64>,
    pub webhook_sent: bool,
    /// The JSON-encoded outcome of the webhook call, if one was made.
    pub webhook_response: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub tx_hash: TxHash,
    pub tx_ref: TxRef,
    pub product_id: ProductId,
    pub merchant_address: WalletAddress,
    pub payer_address: WalletAddress,
    pub amount: TokenAmount,
    pub token_address: Option<WalletAddress>,
    pub status: TransactionStatus,
    pub block_number: Option<i64>,
}
