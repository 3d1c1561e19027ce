//! The public API of the payment-link engine.
//!
//! Each API struct is generic over its storage backend and holds whatever external collaborators it needs. They are
//! cheap to construct, so a server can build one per worker.
mod errors;
mod merchant_api;
mod payment_flow_api;
mod product_api;
mod validation;

pub mod request_objects;
pub mod response_objects;

pub use errors::PaymentLinkError;
pub use merchant_api::MerchantApi;
pub use payment_flow_api::{PaymentFlowApi, MAX_TRANSACTIONS_PER_LISTING};
pub use product_api::ProductApi;
