use ethers::utils::keccak256;

use crate::db_types::{OnChainProductId, ProductId};

/// The contract keys products by `keccak256(utf8(product_id))`, which is what client wallets compute before calling
/// `createProduct`.
pub fn derive_on_chain_product_id(product_id: &ProductId) -> OnChainProductId {
    OnChainProductId::from_bytes(keccak256(product_id.as_str().as_bytes()))
}
