use std::fmt::Debug;

use log::*;

use crate::{
    db_types::NewMerchant,
    helpers::{verify_onboarding_signature, OnboardingSignatureError},
    plg_api::{
        request_objects::{OnboardMerchantRequest, UpdateWebhookRequest},
        response_objects::{MerchantDetails, OnboardOutcome},
        validation::{non_empty, parse_address, validate_webhook_url},
        PaymentLinkError,
    },
    traits::{MerchantManagement, StorageError},
};

/// `MerchantApi` handles merchant onboarding and webhook configuration.
pub struct MerchantApi<B> {
    db: B,
    require_signature: bool,
}

impl<B> Debug for MerchantApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MerchantApi")
    }
}

impl<B> MerchantApi<B> {
    /// When `require_signature` is set, onboarding requests must prove ownership of the wallet with a signature over
    /// [`crate::helpers::onboarding_message`].
    pub fn new(db: B, require_signature: bool) -> Self {
        Self { db, require_signature }
    }
}

impl<B> MerchantApi<B>
where B: MerchantManagement
{
    /// Onboards a merchant wallet. Onboarding is idempotent: if the wallet is already known, the existing record is
    /// returned, after applying the webhook URL if one was supplied.
    pub async fn onboard(&self, request: OnboardMerchantRequest) -> Result<OnboardOutcome, PaymentLinkError> {
        let address = non_empty(request.wallet_address)
            .ok_or_else(|| PaymentLinkError::MissingFields("Wallet address is required".to_string()))?;
        let address = parse_address(&address)?;
        let webhook_url = non_empty(request.webhook_url).map(|url| validate_webhook_url(&url)).transpose()?;
        if self.require_signature {
            let signature = non_empty(request.signature).ok_or(OnboardingSignatureError::MissingSignature)?;
            verify_onboarding_signature(&address, &signature)?;
            debug!("🔄️ Onboarding signature verified for {address}");
        }
        if let Some(merchant) = self.db.fetch_merchant(&address).await? {
            let merchant = match webhook_url {
                Some(url) => {
                    info!("🔄️ Merchant {address} already exists. Updating webhook URL to {url}");
                    self.db.update_webhook_url(&address, Some(url)).await?.unwrap_or(merchant)
                },
                None => merchant,
            };
            return Ok(OnboardOutcome { merchant: merchant.into(), created: false });
        }
        let mut new_merchant = NewMerchant::new(address.clone());
        new_merchant.webhook_url = webhook_url;
        let merchant = match self.db.insert_merchant(new_merchant).await {
            Ok(m) => {
                info!("🔄️ Merchant {address} onboarded");
                OnboardOutcome { merchant: m.into(), created: true }
            },
            // Another request onboarded the same wallet in the meantime
            Err(StorageError::UniqueViolation(_)) => {
                let m = self.db.fetch_merchant(&address).await?.ok_or(PaymentLinkError::MerchantNotFound)?;
                OnboardOutcome { merchant: m.into(), created: false }
            },
            Err(e) => return Err(e.into()),
        };
        Ok(merchant)
    }

    pub async fn merchant(&self, wallet_address: &str) -> Result<MerchantDetails, PaymentLinkError> {
        let address = parse_address(wallet_address)?;
        let merchant = self.db.fetch_merchant(&address).await?.ok_or(PaymentLinkError::MerchantNotFound)?;
        Ok(merchant.into())
    }

    /// Replaces the merchant's webhook URL. A missing or blank URL clears it. Returns the new URL.
    pub async fn update_webhook(
        &self,
        wallet_address: &str,
        request: UpdateWebhookRequest,
    ) -> Result<Option<String>, PaymentLinkError> {
        let address = parse_address(wallet_address)?;
        let webhook_url = non_empty(request.webhook_url).map(|url| validate_webhook_url(&url)).transpose()?;
        let merchant =
            self.db.update_webhook_url(&address, webhook_url).await?.ok_or(PaymentLinkError::MerchantNotFound)?;
        info!("🔄️ Webhook URL for {address} set to {:?}", merchant.webhook_url);
        Ok(merchant.webhook_url)
    }
}
