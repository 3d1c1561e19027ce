use crate::{
    db_types::{NewTransaction, Transaction, TxHash, WalletAddress},
    traits::{ProductManagement, StorageError},
};

/// Storage for payments. Transactions are keyed by their on-chain hash.
#[allow(async_fn_in_trait)]
pub trait TransactionManagement: ProductManagement {
    async fn insert_transaction(&self, transaction: NewTransaction) -> Result<Transaction, StorageError>;

    async fn fetch_transaction_by_hash(&self, tx_hash: &TxHash) -> Result<Option<Transaction>, StorageError>;

    /// The `limit` most recent transactions for the merchant, newest first.
    async fn fetch_transactions_for_merchant(
        &self,
        address: &WalletAddress,
        limit: i64,
    ) -> Result<Vec<Transaction>, StorageError>;

    /// Records the outcome of the merchant webhook call against the transaction.
    async fn update_webhook_outcome(
        &self,
        tx_hash: &TxHash,
        sent: bool,
        response: Option<String>,
    ) -> Result<Transaction, StorageError>;
}
