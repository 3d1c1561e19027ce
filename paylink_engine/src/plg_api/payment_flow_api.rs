use std::{fmt::Debug, sync::Arc};

use log::*;

use crate::{
    db_types::{NewTransaction, Product, ProductId, Transaction, TransactionStatus},
    helpers::new_tx_ref,
    plg_api::{
        request_objects::RecordTransactionRequest,
        response_objects::{RecordedTransaction, TransactionDetails, TransactionListing},
        validation::{non_empty, non_empty_amount, parse_address, parse_amount, parse_token_address, parse_tx_hash},
        PaymentLinkError,
    },
    traits::{StorageError, TransactionManagement, WebhookDelivery, WebhookSender},
    webhook::PaymentSuccessPayload,
};

/// The most transactions returned by a single merchant listing.
pub const MAX_TRANSACTIONS_PER_LISTING: i64 = 100;

/// `PaymentFlowApi` records payments that payers have completed on-chain and notifies the merchant.
pub struct PaymentFlowApi<B> {
    db: B,
    webhooks: Arc<dyn WebhookSender>,
}

impl<B> Debug for PaymentFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PaymentFlowApi")
    }
}

impl<B> PaymentFlowApi<B> {
    pub fn new(db: B, webhooks: Arc<dyn WebhookSender>) -> Self {
        Self { db, webhooks }
    }
}

impl<B> PaymentFlowApi<B>
where B: TransactionManagement
{
    /// Records a confirmed payment against a product.
    ///
    /// The transaction is stored with status `completed` before the merchant is notified. If the merchant has a
    /// webhook URL, a single `payment.success` notification is sent and its outcome is stored on the record. A failed
    /// notification does not fail the call.
    pub async fn record_transaction(
        &self,
        request: RecordTransactionRequest,
    ) -> Result<RecordedTransaction, PaymentLinkError> {
        let missing = || PaymentLinkError::MissingFields("Missing required fields".to_string());
        let tx_hash = non_empty(request.tx_hash).ok_or_else(missing)?;
        let product_id = non_empty(request.product_id).ok_or_else(missing)?;
        let payer_address = non_empty(request.payer_address).ok_or_else(missing)?;
        let amount = non_empty_amount(request.amount).ok_or_else(missing)?;

        let tx_hash = parse_tx_hash(&tx_hash)?;
        let payer_address = parse_address(&payer_address)?;
        let amount = parse_amount(&amount)?;
        let token_address = parse_token_address(request.token_address)?;
        let product_id: ProductId = product_id.parse().map_err(|_| PaymentLinkError::ProductNotFound)?;

        let product =
            self.db.fetch_product_by_product_id(&product_id).await?.ok_or(PaymentLinkError::ProductNotFound)?;
        if self.db.fetch_transaction_by_hash(&tx_hash).await?.is_some() {
            return Err(PaymentLinkError::TransactionAlreadyRecorded);
        }
        let new_tx = NewTransaction {
            tx_hash,
            tx_ref: new_tx_ref(),
            product_id: product.product_id.clone(),
            merchant_address: product.merchant_address.clone(),
            payer_address,
            amount,
            token_address,
            status: TransactionStatus::Completed,
            block_number: request.block_number,
        };
        let transaction = match self.db.insert_transaction(new_tx).await {
            Ok(tx) => tx,
            Err(StorageError::UniqueViolation(_)) => return Err(PaymentLinkError::TransactionAlreadyRecorded),
            Err(e) => return Err(e.into()),
        };
        info!(
            "🔄️💰️ Payment {} of {} for product [{}] recorded. Ref: {}",
            transaction.tx_hash, transaction.amount, transaction.product_id, transaction.tx_ref
        );
        let transaction = self.notify_merchant(transaction, &product).await?;
        Ok(transaction.into())
    }

    async fn notify_merchant(
        &self,
        transaction: Transaction,
        product: &Product,
    ) -> Result<Transaction, PaymentLinkError> {
        let merchant = self.db.fetch_merchant(&product.merchant_address).await?;
        let Some(url) = merchant.and_then(|m| m.webhook_url).filter(|u| !u.is_empty()) else {
            debug!("🔄️💰️ Merchant {} has no webhook configured", product.merchant_address);
            return Ok(transaction);
        };
        let payload = PaymentSuccessPayload::new(&transaction, &product.name);
        let delivery = match serde_json::to_value(&payload) {
            Ok(body) => self.webhooks.send(&url, &body).await,
            Err(e) => WebhookDelivery::failed(500, format!("Could not serialize webhook payload. {e}")),
        };
        let response = serde_json::to_string(&delivery).ok();
        let transaction = self.db.update_webhook_outcome(&transaction.tx_hash, delivery.success, response).await?;
        Ok(transaction)
    }

    /// The merchant's most recent transactions, newest first, each labelled with its product's name.
    pub async fn transactions_for_merchant(
        &self,
        wallet_address: &str,
    ) -> Result<Vec<TransactionListing>, PaymentLinkError> {
        let address = parse_address(wallet_address)?;
        let transactions = self.db.fetch_transactions_for_merchant(&address, MAX_TRANSACTIONS_PER_LISTING).await?;
        let mut result = Vec::with_capacity(transactions.len());
        for tx in transactions {
            let name = self.db.fetch_product_by_product_id(&tx.product_id).await?.map(|p| p.name);
            result.push(TransactionListing::new(tx, name));
        }
        Ok(result)
    }

    pub async fn transaction_by_hash(&self, tx_hash: &str) -> Result<TransactionDetails, PaymentLinkError> {
        let tx_hash = parse_tx_hash(tx_hash)?;
        let tx = self.db.fetch_transaction_by_hash(&tx_hash).await?.ok_or(PaymentLinkError::TransactionNotFound)?;
        let product = self.db.fetch_product_by_product_id(&tx.product_id).await?;
        Ok(TransactionDetails::new(tx, product))
    }
}
