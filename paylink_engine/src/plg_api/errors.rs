use thiserror::Error;

use crate::{helpers::OnboardingSignatureError, traits::StorageError};

/// Everything that can go wrong in the merchant, product and payment flows.
#[derive(Debug, Clone, Error)]
pub enum PaymentLinkError {
    #[error("{0}")]
    MissingFields(String),
    #[error("Invalid wallet address format")]
    InvalidAddress,
    #[error("Invalid webhook URL: {0}")]
    InvalidWebhookUrl(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid transaction hash: {0}")]
    InvalidTxHash(String),
    #[error("Invalid on-chain product id: {0}")]
    InvalidOnChainProductId(String),
    #[error("Invalid onboarding signature. {0}")]
    InvalidSignature(String),
    #[error("Merchant not found")]
    MerchantNotFound,
    #[error("Merchant not found. Please onboard first.")]
    MerchantNotOnboarded,
    #[error("Product not found")]
    ProductNotFound,
    #[error("Product is not active")]
    ProductInactive,
    #[error("Product with this ID already exists")]
    ProductAlreadyExists,
    #[error("Transaction not found")]
    TransactionNotFound,
    #[error("Transaction has already been recorded")]
    TransactionAlreadyRecorded,
    #[error("{0}")]
    VerificationFailed(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl PaymentLinkError {
    /// `true` for errors caused by a lookup that came back empty.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::MerchantNotFound | Self::MerchantNotOnboarded | Self::ProductNotFound | Self::TransactionNotFound
        )
    }

    /// `true` for errors caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::DatabaseError(_)) && !self.is_not_found()
    }
}

impl From<StorageError> for PaymentLinkError {
    fn from(e: StorageError) -> Self {
        Self::DatabaseError(e.to_string())
    }
}

impl From<OnboardingSignatureError> for PaymentLinkError {
    fn from(e: OnboardingSignatureError) -> Self {
        Self::InvalidSignature(e.to_string())
    }
}
