use crate::{
    db_types::{NewProduct, Product, ProductId, ProductUpdate, ShareableLink, WalletAddress},
    traits::{MerchantManagement, StorageError},
};

/// Storage for the off-chain copy of products. A product refers to its merchant by wallet address.
#[allow(async_fn_in_trait)]
pub trait ProductManagement: MerchantManagement {
    async fn insert_product(&self, product: NewProduct) -> Result<Product, StorageError>;

    async fn fetch_product_by_product_id(&self, product_id: &ProductId) -> Result<Option<Product>, StorageError>;

    async fn fetch_product_by_shareable_link(&self, link: &ShareableLink) -> Result<Option<Product>, StorageError>;

    /// All products for the merchant, most recently created first.
    async fn fetch_products_for_merchant(&self, address: &WalletAddress) -> Result<Vec<Product>, StorageError>;

    /// Applies the update to the stored record only. Returns `None` if the product does not exist.
    async fn update_product(
        &self,
        product_id: &ProductId,
        update: ProductUpdate,
    ) -> Result<Option<Product>, StorageError>;
}
