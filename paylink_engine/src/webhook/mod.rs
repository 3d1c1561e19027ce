//! Outbound merchant notifications.
//!
//! A webhook is a single JSON `POST` to the merchant's configured URL once a payment has been recorded. There are no
//! retries: the outcome of the one attempt is stored on the transaction record and the payment flow carries on
//! regardless.
mod client;
mod payload;

pub use client::{compute_signature, WebhookClient, WebhookError, SIGNATURE_HEADER};
pub use payload::{PaymentSuccessPayload, WebhookTransaction, PAYMENT_SUCCESS_EVENT};
