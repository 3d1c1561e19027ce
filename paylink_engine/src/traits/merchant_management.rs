use crate::{
    db_types::{Merchant, NewMerchant, WalletAddress},
    traits::StorageError,
};

/// Storage for onboarded merchants. Merchants are keyed by their lowercase wallet address and are never deleted.
#[allow(async_fn_in_trait)]
pub trait MerchantManagement {
    /// Fetches the merchant for the given wallet address. If no merchant has onboarded with it, `None` is returned.
    async fn fetch_merchant(&self, address: &WalletAddress) -> Result<Option<Merchant>, StorageError>;

    /// Inserts a new, active merchant. Fails with [`StorageError::UniqueViolation`] if the address already exists.
    async fn insert_merchant(&self, merchant: NewMerchant) -> Result<Merchant, StorageError>;

    /// Replaces the webhook URL for the merchant. `None` clears it.
    ///
    /// Returns the updated record, or `None` if the merchant does not exist.
    async fn update_webhook_url(
        &self,
        address: &WalletAddress,
        webhook_url: Option<String>,
    ) -> Result<Option<Merchant>, StorageError>;
}
