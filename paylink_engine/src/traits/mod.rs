//! # Backend and collaborator interfaces
//!
//! This module defines the interface contracts that the payment-link engine relies on.
//!
//! ## Storage
//! Merchants, products and transactions live in three tables that reference each other _by value_ (wallet address,
//! product id), not through ownership pointers. The storage traits build on each other, so a backend that can record
//! transactions can also look up the products and merchants they refer to:
//!
//! * [`MerchantManagement`] stores onboarded merchant wallets and their webhook URLs.
//! * [`ProductManagement`] stores the off-chain copy of products registered on the payment contract.
//! * [`TransactionManagement`] stores confirmed payments and the outcome of the merchant webhook call.
//!
//! ## External collaborators
//! * [`ChainReader`] is a read-only view of the blockchain, used to cross-check transaction hashes that clients
//!   report.
//! * [`WebhookSender`] delivers payment notifications to merchant endpoints.
mod chain_reader;
mod merchant_management;
mod product_management;
mod storage_error;
mod transaction_management;
mod webhook_sender;

pub use chain_reader::{ChainReader, ChainReaderError, ChainReceipt, ChainTransaction};
pub use merchant_management::MerchantManagement;
pub use product_management::ProductManagement;
pub use storage_error::StorageError;
pub use transaction_management::TransactionManagement;
pub use webhook_sender::{WebhookDelivery, WebhookSender};
