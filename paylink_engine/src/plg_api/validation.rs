use log::warn;
use paylink_common::{AmountInput, TokenAmount};
use reqwest::Url;

use crate::{
    db_types::{OnChainProductId, ProductId, TxHash, WalletAddress},
    plg_api::PaymentLinkError,
};

/// Trims the value and treats blank strings the same as absent ones.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

pub(crate) fn non_empty_amount(value: Option<AmountInput>) -> Option<String> {
    non_empty(value.map(AmountInput::into_text))
}

pub(crate) fn parse_address(value: &str) -> Result<WalletAddress, PaymentLinkError> {
    value.parse().map_err(|_| PaymentLinkError::InvalidAddress)
}

/// Token addresses are optional. Absent or blank means the chain's native currency.
pub(crate) fn parse_token_address(value: Option<String>) -> Result<Option<WalletAddress>, PaymentLinkError> {
    non_empty(value).map(|s| parse_address(&s)).transpose()
}

pub(crate) fn parse_amount(value: &str) -> Result<TokenAmount, PaymentLinkError> {
    value.parse().map_err(|_| PaymentLinkError::InvalidAmount(value.to_string()))
}

pub(crate) fn parse_tx_hash(value: &str) -> Result<TxHash, PaymentLinkError> {
    value.parse().map_err(|_| PaymentLinkError::InvalidTxHash(value.to_string()))
}

pub(crate) fn parse_product_id(value: &str) -> Result<ProductId, PaymentLinkError> {
    value.parse().map_err(|_| PaymentLinkError::MissingFields("Product id is required".to_string()))
}

pub(crate) fn parse_on_chain_product_id(value: &str) -> Result<OnChainProductId, PaymentLinkError> {
    value.parse().map_err(|_| PaymentLinkError::InvalidOnChainProductId(value.to_string()))
}

/// Webhook URLs must be absolute `http` or `https` URLs. Plain `http` is accepted, but payloads will travel in
/// cleartext, so a warning is logged.
pub(crate) fn validate_webhook_url(value: &str) -> Result<String, PaymentLinkError> {
    let url = Url::parse(value).map_err(|e| PaymentLinkError::InvalidWebhookUrl(format!("{value}. {e}")))?;
    match url.scheme() {
        "https" => {},
        "http" => warn!("📮️ Webhook URL {value} does not use HTTPS. Payloads will be sent in cleartext"),
        s => return Err(PaymentLinkError::InvalidWebhookUrl(format!("{value}. Unsupported scheme {s}"))),
    }
    Ok(value.to_string())
}
