//! Side-effect-free format checks for untrusted key material

use crate::crypto::keys::{is_valid_wif_with, ChecksumPolicy, PrivateKey};
use crate::crypto::mnemonic;

/// Check a hex private key: optional `0x`, 64 hex characters, and a valid scalar
pub fn validate_private_key(input: &str) -> bool {
    PrivateKey::from_hex(input).is_ok()
}

/// Check a mnemonic phrase: known words, supported length, matching checksum
pub fn validate_mnemonic(phrase: &str) -> bool {
    mnemonic::validate_mnemonic(phrase)
}

/// Check a WIF string: Base58, length, checksum under `policy`, valid scalar
pub fn validate_wif(wif: &str, policy: ChecksumPolicy) -> bool {
    is_valid_wif_with(wif, policy)
}

/// Normalize a hex private key to its canonical lowercase form without prefix
pub fn normalize_private_key(input: &str) -> Option<String> {
    PrivateKey::from_hex(input.trim()).ok().map(|key| key.to_hex())
}
