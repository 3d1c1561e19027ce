mod onboarding_signature;
mod product_ids;
mod tokens;

pub use onboarding_signature::{onboarding_message, verify_onboarding_signature, OnboardingSignatureError};
pub use product_ids::derive_on_chain_product_id;
pub use tokens::{new_shareable_link, new_tx_ref, SHAREABLE_LINK_LENGTH, TX_REF_LENGTH};
