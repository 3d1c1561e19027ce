mod amount;

pub mod helpers;
mod secret;

pub use amount::{AmountInput, TokenAmount, TokenAmountConversionError};
pub use secret::Secret;
