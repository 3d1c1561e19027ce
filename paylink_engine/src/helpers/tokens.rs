use rand::{distributions::Alphanumeric, thread_rng, Rng};

use crate::db_types::{ShareableLink, TxRef};

pub const SHAREABLE_LINK_LENGTH: usize = 12;
pub const TX_REF_LENGTH: usize = 21;

fn random_token(len: usize) -> String {
    thread_rng().sample_iter(&Alphanumeric).take(len).map(char::from).collect()
}

/// Generates a fresh payment link token. Collisions are not checked here; the unique index on `shareable_link` is
/// the only guard.
pub fn new_shareable_link() -> ShareableLink {
    ShareableLink(random_token(SHAREABLE_LINK_LENGTH))
}

pub fn new_tx_ref() -> TxRef {
    TxRef(random_token(TX_REF_LENGTH))
}
