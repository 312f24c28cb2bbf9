//! Address management

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::crypto::keys::PublicKey;

/// Number of hex characters kept from the hash
pub const ADDRESS_LEN: usize = 40;

/// A user address: the first 40 hex characters of SHA-256 over the public key's hex text.
///
/// The hash input is the lowercase hex string, not the raw point bytes;
/// addresses already issued depend on that encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Derive the address for a public key
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        derive_address(&public_key.to_hex())
    }

    /// Get the address string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive an address from a public key in hex form
pub fn derive_address(public_key_hex: &str) -> Address {
    let digest = Sha256::digest(public_key_hex.as_bytes());
    let mut address = hex::encode(digest);
    address.truncate(ADDRESS_LEN);

    Address(address)
}

/// Check that a string has the shape of an address: 40 hex characters
pub fn is_address_format(address: &str) -> bool {
    address.len() == ADDRESS_LEN && address.chars().all(|c| c.is_ascii_hexdigit())
}
