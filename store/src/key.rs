//! Storage key derivation.
//!
//! Items live under `blake2_128(module) ++ blake2_128(item)`. Map entries
//! append `blake2_128(key) ++ key`, so keys are both well distributed and
//! reversible.

use blake2::digest::consts::U16;
use blake2::{Blake2b, Digest};
use balances_types::AccountId;

type Blake2b128 = Blake2b<U16>;

/// A raw storage key.
pub type StorageKey = Vec<u8>;

/// Compute a 128-bit Blake2b hash.
pub fn blake2_128(data: &[u8]) -> [u8; 16] {
    let mut hasher = Blake2b128::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 16];
    output.copy_from_slice(&result);
    output
}

/// The 32-byte key of a storage item: module-prefix hash then item-name hash.
pub fn storage_prefix(module: &str, item: &str) -> [u8; 32] {
    let mut key = [0u8; 32];
    key[..16].copy_from_slice(&blake2_128(module.as_bytes()));
    key[16..].copy_from_slice(&blake2_128(item.as_bytes()));
    key
}

/// The key of one account entry in a map item.
pub fn account_key(module: &str, item: &str, who: &AccountId) -> StorageKey {
    let mut key = Vec::with_capacity(32 + 16 + AccountId::LEN);
    key.extend_from_slice(&storage_prefix(module, item));
    key.extend_from_slice(&blake2_128(who.as_bytes()));
    key.extend_from_slice(who.as_bytes());
    key
}

/// Recover the account id from a key built by [`account_key`].
pub fn account_from_key(key: &[u8]) -> Option<AccountId> {
    if key.len() != 32 + 16 + AccountId::LEN {
        return None;
    }
    AccountId::from_slice(&key[48..])
}
