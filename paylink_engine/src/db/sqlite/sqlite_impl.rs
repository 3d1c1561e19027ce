//! `SqliteDatabase` is the concrete SQLite backend for the payment-link engine.
use std::fmt::Debug;

use log::*;
use sqlx::SqlitePool;

use super::{merchants, new_pool, products, transactions};
use crate::{
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
    traits::{MerchantManagement, ProductManagement, StorageError, TransactionManagement},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({})", self.url)
    }
}

impl SqliteDatabase {
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("🗃️ Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// Brings the schema up to date using the migrations embedded in the binary.
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./src/db/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Database migrations complete for {}", self.url);
        Ok(())
    }
}

impl MerchantManagement for SqliteDatabase {
    async fn fetch_merchant(&self, address: &WalletAddress) -> Result<Option<Merchant>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        let merchant = merchants::fetch_merchant_by_address(address, &mut conn).await?;
        Ok(merchant)
    }

    async fn insert_merchant(&self, merchant: NewMerchant) -> Result<Merchant, StorageError> {
        let mut conn = self.pool.acquire().await?;
        let merchant = merchants::insert_merchant(merchant, &mut conn).await?;
        Ok(merchant)
    }

    async fn update_webhook_url(
        &self,
        address: &WalletAddress,
        webhook_url: Option<String>,
    ) -> Result<Option<Merchant>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        let merchant = merchants::update_webhook_url(address, webhook_url, &mut conn).await?;
        Ok(merchant)
    }
}

impl ProductManagement for SqliteDatabase {
    async fn insert_product(&self, product: NewProduct) -> Result<Product, StorageError> {
        let mut conn = self.pool.acquire().await?;
        let product = products::insert_product(product, &mut conn).await?;
        Ok(product)
    }

    async fn fetch_product_by_product_id(&self, product_id: &ProductId) -> Result<Option<Product>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        let product = products::fetch_product_by_product_id(product_id, &mut conn).await?;
        Ok(product)
    }

    async fn fetch_product_by_shareable_link(&self, link: &ShareableLink) -> Result<Option<Product>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        let product = products::fetch_product_by_shareable_link(link, &mut conn).await?;
        Ok(product)
    }

    async fn fetch_products_for_merchant(&self, address: &WalletAddress) -> Result<Vec<Product>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        let products = products::fetch_products_for_merchant(address, &mut conn).await?;
        Ok(products)
    }

    async fn update_product(
        &self,
        product_id: &ProductId,
        update: ProductUpdate,
    ) -> Result<Option<Product>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        let product = products::update_product(product_id, update, &mut conn).await?;
        Ok(product)
    }
}

impl TransactionManagement for SqliteDatabase {
    async fn insert_transaction(&self, transaction: NewTransaction) -> Result<Transaction, StorageError> {
        let mut conn = self.pool.acquire().await?;
        let transaction = transactions::insert_transaction(transaction, &mut conn).await?;
        Ok(transaction)
    }

    async fn fetch_transaction_by_hash(&self, tx_hash: &TxHash) -> Result<Option<Transaction>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        let transaction = transactions::fetch_transaction_by_hash(tx_hash, &mut conn).await?;
        Ok(transaction)
    }

    async fn fetch_transactions_for_merchant(
        &self,
        address: &WalletAddress,
        limit: i64,
    ) -> Result<Vec<Transaction>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        let transactions = transactions::fetch_transactions_for_merchant(address, limit, &mut conn).await?;
        Ok(transactions)
    }

    async fn update_webhook_outcome(
        &self,
        tx_hash: &TxHash,
        sent: bool,
        response: Option<String>,
    ) -> Result<Transaction, StorageError> {
        let mut conn = self.pool.acquire().await?;
        let transaction = transactions::update_webhook_outcome(tx_hash, sent, response, &mut conn).await?;
        debug!("🗃️ Webhook outcome stored for transaction [{tx_hash}]. Sent: {sent}");
        Ok(transaction)
    }
}
