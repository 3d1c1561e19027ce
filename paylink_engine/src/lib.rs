//! Paylink Engine
//!
//! The payment-link engine holds the core logic of the Paylink gateway. Merchants register products on a payment
//! contract from their own wallets; the engine keeps an off-chain copy of those products, hands out shareable payment
//! links, records the payments that come in and notifies merchants through webhooks.
//!
//! The library is divided into these sections:
//! 1. Storage ([`traits`] and the SQLite backend, [`SqliteDatabase`]). The storage traits are all you need to
//!    implement to provide a new backend. The data types stored are defined in [`db_types`].
//! 2. External collaborators: a read-only view of the chain ([`chain`]) and the webhook client ([`webhook`]).
//! 3. The public API ([`MerchantApi`], [`ProductApi`] and [`PaymentFlowApi`]). This is what a server should use.
mod db;
mod plg_api;

pub mod chain;
pub mod db_types;
pub mod helpers;
pub mod traits;
pub mod webhook;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

#[cfg(feature = "sqlite")]
pub use db::sqlite::SqliteDatabase;
pub use plg_api::{
    request_objects,
    response_objects,
    MerchantApi,
    PaymentFlowApi,
    PaymentLinkError,
    ProductApi,
    MAX_TRANSACTIONS_PER_LISTING,
};
