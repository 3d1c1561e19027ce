use std::{fmt::Debug, sync::Arc};

use log::*;

use crate::{
    db_types::{NewProduct, ProductId, ProductUpdate, ShareableLink, TxHash, WalletAddress},
    helpers::{derive_on_chain_product_id, new_shareable_link},
    plg_api::{
        request_objects::{CreateProductRequest, UpdateProductRequest},
        response_objects::{CreatedProduct, ProductListing, PublicProduct, UpdatedProduct},
        validation::{
            non_empty,
            non_empty_amount,
            parse_address,
            parse_amount,
            parse_on_chain_product_id,
            parse_product_id,
            parse_token_address,
            parse_tx_hash,
        },
        PaymentLinkError,
    },
    traits::{ChainReader, ProductManagement, StorageError},
};

const REQUIRED_PRODUCT_FIELDS: &str =
    "Merchant address, name, price, productId, onChainProductId, and txHash are required";

/// `ProductApi` persists products after the merchant has registered them on the payment contract, and serves them
/// back to merchants and payers.
pub struct ProductApi<B> {
    db: B,
    chain: Option<Arc<dyn ChainReader>>,
    frontend_url: String,
}

impl<B> Debug for ProductApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ProductApi (chain verification: {})", self.chain.is_some())
    }
}

impl<B> ProductApi<B> {
    /// Without a chain reader, creation transactions are taken on trust.
    pub fn new(db: B, chain: Option<Arc<dyn ChainReader>>, frontend_url: &str) -> Self {
        Self { db, chain, frontend_url: frontend_url.to_string() }
    }
}

impl<B> ProductApi<B>
where B: ProductManagement
{
    /// Stores a product whose creation transaction the merchant has already submitted on-chain.
    ///
    /// If a chain reader is available, the transaction is checked before anything is stored: it must exist, it must
    /// have succeeded and it must have been sent by the merchant. If the chain cannot be reached, the check is skipped
    /// with a warning.
    pub async fn create_product(&self, request: CreateProductRequest) -> Result<CreatedProduct, PaymentLinkError> {
        let missing = || PaymentLinkError::MissingFields(REQUIRED_PRODUCT_FIELDS.to_string());
        let merchant_address = non_empty(request.merchant_address).ok_or_else(missing)?;
        let name = non_empty(request.name).ok_or_else(missing)?;
        let price = non_empty_amount(request.price).ok_or_else(missing)?;
        let product_id = non_empty(request.product_id).ok_or_else(missing)?;
        let on_chain_product_id = non_empty(request.on_chain_product_id).ok_or_else(missing)?;
        let tx_hash = non_empty(request.tx_hash).ok_or_else(missing)?;

        let merchant_address = parse_address(&merchant_address)?;
        let price = parse_amount(&price)?;
        let product_id = parse_product_id(&product_id)?;
        let on_chain_product_id = parse_on_chain_product_id(&on_chain_product_id)?;
        let tx_hash = parse_tx_hash(&tx_hash)?;
        let token_address = parse_token_address(request.token_address)?;

        if self.db.fetch_merchant(&merchant_address).await?.is_none() {
            return Err(PaymentLinkError::MerchantNotOnboarded);
        }
        let verified_block = self.verify_creation_tx(&tx_hash, &merchant_address).await?;
        if self.db.fetch_product_by_product_id(&product_id).await?.is_some() {
            return Err(PaymentLinkError::ProductAlreadyExists);
        }
        let expected_id = derive_on_chain_product_id(&product_id);
        if expected_id != on_chain_product_id {
            warn!(
                "🔄️ On-chain id {on_chain_product_id} for product [{product_id}] does not match the expected value \
                 {expected_id}"
            );
        }
        let product = NewProduct {
            product_id,
            merchant_address,
            name,
            description: non_empty(request.description).unwrap_or_default(),
            image_link: non_empty(request.image_link).unwrap_or_default(),
            price,
            token_address,
            on_chain_product_id,
            shareable_link: new_shareable_link(),
            creation_tx_hash: tx_hash,
            creation_block_number: request.block_number.or(verified_block),
        };
        let product = match self.db.insert_product(product).await {
            Ok(p) => p,
            Err(StorageError::UniqueViolation(e)) => {
                warn!("🔄️ Product insert rejected by a unique index. {e}");
                return Err(PaymentLinkError::ProductAlreadyExists);
            },
            Err(e) => return Err(e.into()),
        };
        info!("🔄️ Product [{}] created for merchant {}", product.product_id, product.merchant_address);
        Ok(CreatedProduct::new(product, &self.frontend_url))
    }

    /// Checks the creation transaction against the chain. Returns the block it was mined in, if known.
    async fn verify_creation_tx(
        &self,
        tx_hash: &TxHash,
        merchant: &WalletAddress,
    ) -> Result<Option<i64>, PaymentLinkError> {
        let Some(chain) = &self.chain else {
            debug!("🔄️ No chain reader configured. Skipping verification of {tx_hash}");
            return Ok(None);
        };
        match chain.fetch_transaction(tx_hash).await {
            Ok(Some(_)) => {},
            Ok(None) => return Err(PaymentLinkError::VerificationFailed("Transaction not found on-chain".into())),
            Err(e) => {
                warn!("🔄️ Could not verify transaction {tx_hash} on-chain. {e}");
                return Ok(None);
            },
        }
        let receipt = match chain.fetch_receipt(tx_hash).await {
            Ok(Some(receipt)) if receipt.succeeded => receipt,
            Ok(_) => return Err(PaymentLinkError::VerificationFailed("Transaction failed on-chain".into())),
            Err(e) => {
                warn!("🔄️ Could not verify transaction {tx_hash} on-chain. {e}");
                return Ok(None);
            },
        };
        if !merchant.matches(receipt.from.as_str()) {
            return Err(PaymentLinkError::VerificationFailed(
                "Transaction sender does not match merchant address".into(),
            ));
        }
        info!("🔄️ Transaction {tx_hash} verified on-chain");
        Ok(receipt.block_number.and_then(|n| i64::try_from(n).ok()))
    }

    /// All of the merchant's products, newest first.
    pub async fn products_for_merchant(&self, wallet_address: &str) -> Result<Vec<ProductListing>, PaymentLinkError> {
        let address = parse_address(wallet_address)?;
        let products = self.db.fetch_products_for_merchant(&address).await?;
        trace!("🔄️ {} products found for {address}", products.len());
        Ok(products.into_iter().map(|p| ProductListing::new(p, &self.frontend_url)).collect())
    }

    /// Looks up a product from its payment link token. Inactive products are not served.
    pub async fn product_by_link(&self, token: &str) -> Result<PublicProduct, PaymentLinkError> {
        let link = ShareableLink(token.to_string());
        let product = self.db.fetch_product_by_shareable_link(&link).await?.ok_or(PaymentLinkError::ProductNotFound)?;
        if !product.is_active {
            return Err(PaymentLinkError::ProductInactive);
        }
        Ok(product.into())
    }

    /// Edits the stored price and active flag. The contract is not touched.
    pub async fn update_product(
        &self,
        product_id: &str,
        request: UpdateProductRequest,
    ) -> Result<UpdatedProduct, PaymentLinkError> {
        let product_id: ProductId = product_id.parse().map_err(|_| PaymentLinkError::ProductNotFound)?;
        let price = non_empty_amount(request.price).map(|p| parse_amount(&p)).transpose()?;
        let update = ProductUpdate { price, is_active: request.is_active };
        let product = self.db.update_product(&product_id, update).await?.ok_or(PaymentLinkError::ProductNotFound)?;
        debug!("🔄️ Product [{product_id}] updated. Price: {}, active: {}", product.price, product.is_active);
        Ok(product.into())
    }
}
