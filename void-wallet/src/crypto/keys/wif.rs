//! Wallet Import Format encoding of private keys
//!
//! A WIF string is the Base58 encoding of `version || key || checksum`, where
//! the checksum is the first four bytes of SHA-256(SHA-256(version || key)).

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use super::derivation::{PrivateKey, PRIVATE_KEY_LEN};

/// Mainnet WIF version byte
pub const WIF_VERSION: u8 = 0x80;

/// Length of the Base58Check checksum
pub const CHECKSUM_LEN: usize = 4;

/// Minimum decoded WIF length: version, key and checksum
pub const MIN_WIF_PAYLOAD_LEN: usize = 1 + PRIVATE_KEY_LEN + CHECKSUM_LEN;

/// How strictly a decoded WIF checksum is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChecksumPolicy {
    /// Recompute the checksum and reject mismatches
    #[default]
    Verify,
    /// Accept any trailing bytes, only re-validating the extracted key
    Skip,
}

/// First four bytes of the double SHA-256 of `data`
pub fn checksum(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);

    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&second[..CHECKSUM_LEN]);
    out
}

/// Base58 encode `data` with its checksum appended
pub fn base58check_encode(data: &[u8]) -> String {
    let mut payload = Zeroizing::new(Vec::with_capacity(data.len() + CHECKSUM_LEN));
    payload.extend_from_slice(data);
    payload.extend_from_slice(&checksum(data));

    bs58::encode(payload.as_slice()).into_string()
}

/// Encode a private key as a WIF string
pub fn encode_wif(private_key: &PrivateKey) -> String {
    let mut versioned = Zeroizing::new(Vec::with_capacity(1 + PRIVATE_KEY_LEN));
    versioned.push(WIF_VERSION);
    versioned.extend_from_slice(private_key.as_bytes());

    base58check_encode(&versioned)
}

/// Decode a WIF string, verifying its checksum
pub fn decode_wif(wif: &str) -> Result<PrivateKey> {
    decode_wif_with(wif, ChecksumPolicy::Verify)
}

/// Decode a WIF string under the given checksum policy.
///
/// The key is read from bytes `[1..33)`; the version byte is not checked, and a
/// trailing compression flag is tolerated as part of the checksummed payload.
pub fn decode_wif_with(wif: &str, policy: ChecksumPolicy) -> Result<PrivateKey> {
    let decoded = Zeroizing::new(
        bs58::decode(wif.trim())
            .into_vec()
            .map_err(|e| Error::InvalidWif(e.to_string()))?,
    );

    if decoded.len() < MIN_WIF_PAYLOAD_LEN {
        return Err(Error::InvalidWif(format!(
            "decoded length {} is below {}",
            decoded.len(),
            MIN_WIF_PAYLOAD_LEN
        )));
    }

    if policy == ChecksumPolicy::Verify {
        let (payload, expected) = decoded.split_at(decoded.len() - CHECKSUM_LEN);
        if checksum(payload) != expected {
            return Err(Error::InvalidWif("checksum mismatch".to_string()));
        }
    }

    PrivateKey::from_slice(&decoded[1..1 + PRIVATE_KEY_LEN])
        .map_err(|e| Error::InvalidWif(e.to_string()))
}

/// Check whether a string decodes as a WIF private key
pub fn is_valid_wif(wif: &str) -> bool {
    decode_wif(wif).is_ok()
}

/// Check whether a string decodes as a WIF private key under the given policy
pub fn is_valid_wif_with(wif: &str, policy: ChecksumPolicy) -> bool {
    decode_wif_with(wif, policy).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_WIF: &str = "5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf";

    fn key_one() -> PrivateKey {
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        PrivateKey::from_slice(&bytes).unwrap()
    }

    /// Re-encode a decoded WIF after flipping one checksum byte
    fn corrupt_checksum(wif: &str) -> String {
        let mut decoded = bs58::decode(wif).into_vec().unwrap();
        let last = decoded.len() - 1;
        decoded[last] ^= 0xff;
        bs58::encode(decoded).into_string()
    }

    #[test]
    fn test_encode_known_vector() {
        assert_eq!(encode_wif(&key_one()), ONE_WIF);
    }

    #[test]
    fn test_decode_known_vector() {
        assert_eq!(decode_wif(ONE_WIF).unwrap(), key_one());
    }

    #[test]
    fn test_round_trip() {
        let key = PrivateKey::from_hex(&"3c".repeat(32)).unwrap();
        let wif = encode_wif(&key);
        assert!(wif.starts_with('5'));
        assert_eq!(decode_wif(&wif).unwrap(), key);
    }

    #[test]
    fn test_compressed_wif_accepted() {
        let mut versioned = vec![WIF_VERSION];
        versioned.extend_from_slice(key_one().as_bytes());
        versioned.push(0x01);
        let wif = base58check_encode(&versioned);

        assert!(wif.starts_with('K') || wif.starts_with('L'));
        assert_eq!(decode_wif(&wif).unwrap(), key_one());
    }

    #[test]
    fn test_checksum_mismatch() {
        let bad = corrupt_checksum(ONE_WIF);

        assert!(matches!(decode_wif(&bad), Err(Error::InvalidWif(_))));
        assert!(!is_valid_wif(&bad));
        assert_eq!(decode_wif_with(&bad, ChecksumPolicy::Skip).unwrap(), key_one());
    }

    #[test]
    fn test_too_short() {
        let short = bs58::encode([WIF_VERSION; 20]).into_string();
        assert!(matches!(decode_wif(&short), Err(Error::InvalidWif(_))));
        assert!(!is_valid_wif_with(&short, ChecksumPolicy::Skip));
    }

    #[test]
    fn test_not_base58() {
        // '0', 'O', 'I' and 'l' are outside the alphabet
        assert!(!is_valid_wif("0OIl"));
        assert!(!is_valid_wif(""));
        assert!(!is_valid_wif(&"ab".repeat(32)));
    }

    #[test]
    fn test_zero_key_rejected() {
        let mut versioned = vec![WIF_VERSION];
        versioned.extend_from_slice(&[0u8; 32]);
        let wif = base58check_encode(&versioned);

        assert!(matches!(decode_wif(&wif), Err(Error::InvalidWif(_))));
    }
}
