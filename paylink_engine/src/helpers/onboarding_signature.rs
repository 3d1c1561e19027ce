//! Proof of wallet ownership for merchant onboarding.
//!
//! A merchant proves that they control the wallet they are onboarding by signing a fixed message with
//! `personal_sign` (EIP-191). The server recovers the signer and compares it with the claimed address.
use std::str::FromStr;

use ethers::types::Signature;
use thiserror::Error;

use crate::db_types::WalletAddress;

#[derive(Debug, Clone, Error)]
pub enum OnboardingSignatureError {
    #[error("An onboarding signature is required")]
    MissingSignature,
    #[error("The onboarding signature is malformed. {0}")]
    MalformedSignature(String),
    #[error("The onboarding signature was not made by {0}")]
    SignerMismatch(WalletAddress),
}

/// The message a merchant wallet must sign to onboard `address`.
pub fn onboarding_message(address: &WalletAddress) -> String {
    format!("paylink onboarding: {address}")
}

pub fn verify_onboarding_signature(
    address: &WalletAddress,
    signature: &str,
) -> Result<(), OnboardingSignatureError> {
    let signature =
        Signature::from_str(signature).map_err(|e| OnboardingSignatureError::MalformedSignature(e.to_string()))?;
    let message = onboarding_message(address);
    let signer =
        signature.recover(message.as_str()).map_err(|e| OnboardingSignatureError::MalformedSignature(e.to_string()))?;
    if address.matches(&format!("{signer:#x}")) {
        Ok(())
    } else {
        Err(OnboardingSignatureError::SignerMismatch(address.clone()))
    }
}
