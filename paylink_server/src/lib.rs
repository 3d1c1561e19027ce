//! # Paylink server
//! This crate hosts the REST server for the Paylink payment-link gateway. It is responsible for:
//! * Onboarding merchants and managing their webhook URLs.
//! * Storing products that merchants have registered on the payment contract, and serving them via shareable links.
//! * Recording payments and notifying merchants through their webhooks.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that also reports whether the payment contract was reachable at startup.
//! * `/api/merchants/...`: Merchant onboarding and lookup.
//! * `/api/products/...`: Product creation, listing, lookup by shareable link and updates.
//! * `/api/transactions/...`: Payment recording and lookup.
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
