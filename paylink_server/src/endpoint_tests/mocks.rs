use async_trait::async_trait;
use mockall::mock;
use paylink_engine::{
    db_types::{
        Merchant,
        NewMerchant,
        NewProduct,
        NewTransaction,
        Product,
        ProductId,
        ProductUpdate,
        ShareableLink,
        Transaction,
        TxHash,
        WalletAddress,
    },
    traits::{
        ChainReader,
        ChainReaderError,
        ChainReceipt,
        ChainTransaction,
        MerchantManagement,
        ProductManagement,
        StorageError,
        TransactionManagement,
        WebhookDelivery,
        WebhookSender,
    },
};
use serde_json::Value;

mock! {
    pub PaylinkDatabase {}
    impl MerchantManagement for PaylinkDatabase {
        async fn fetch_merchant(&self, address: &WalletAddress) -> Result<Option<Merchant>, StorageError>;
        async fn insert_merchant(&self, merchant: NewMerchant) -> Result<Merchant, StorageError>;
        async fn update_webhook_url(&self, address: &WalletAddress, webhook_url: Option<String>) -> Result<Option<Merchant>, StorageError>;
    }
    impl ProductManagement for PaylinkDatabase {
        async fn insert_product(&self, product: NewProduct) -> Result<Product, StorageError>;
        async fn fetch_product_by_product_id(&self, product_id: &ProductId) -> Result<Option<Product>, StorageError>;
        async fn fetch_product_by_shareable_link(&self, link: &ShareableLink) -> Result<Option<Product>, StorageError>;
        async fn fetch_products_for_merchant(&self, address: &WalletAddress) -> Result<Vec<Product>, StorageError>;
        async fn update_product(&self, product_id: &ProductId, update: ProductUpdate) -> Result<Option<Product>, StorageError>;
    }
    impl TransactionManagement for PaylinkDatabase {
        async fn insert_transaction(&self, transaction: NewTransaction) -> Result<Transaction, StorageError>;
        async fn fetch_transaction_by_hash(&self, tx_hash: &TxHash) -> Result<Option<Transaction>, StorageError>;
        async fn fetch_transactions_for_merchant(&self, address: &WalletAddress, limit: i64) -> Result<Vec<Transaction>, StorageError>;
        async fn update_webhook_outcome(&self, tx_hash: &TxHash, sent: bool, response: Option<String>) -> Result<Transaction, StorageError>;
    }
}

mock! {
    pub Chain {}
    #[async_trait]
    impl ChainReader for Chain {
        async fn fetch_transaction(&self, tx_hash: &TxHash) -> Result<Option<ChainTransaction>, ChainReaderError>;
        async fn fetch_receipt(&self, tx_hash: &TxHash) -> Result<Option<ChainReceipt>, ChainReaderError>;
    }
}

mock! {
    pub Webhooks {}
    #[async_trait]
    impl WebhookSender for Webhooks {
        async fn send(&self, url: &str, payload: &Value) -> WebhookDelivery;
    }
}
