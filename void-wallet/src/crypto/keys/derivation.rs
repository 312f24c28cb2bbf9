//! Private/public key types and secp256k1 public key derivation

use std::fmt;

use secp256k1::{PublicKey as Secp256k1PublicKey, Secp256k1, SecretKey, SignOnly};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{Error, Result};

/// Length of a raw private key in bytes
pub const PRIVATE_KEY_LEN: usize = 32;

/// Length of an uncompressed public key in bytes
pub const PUBLIC_KEY_LEN: usize = 65;

/// A secp256k1 private key.
///
/// Construction always checks the bytes form a valid scalar (nonzero and
/// below the curve order), so holding a `PrivateKey` means derivation from it
/// cannot be rejected. The bytes are wiped when the value is dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    bytes: [u8; PRIVATE_KEY_LEN],
}

impl PrivateKey {
    /// Create a private key from raw bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PRIVATE_KEY_LEN {
            return Err(Error::InvalidPrivateKey(format!(
                "expected {} bytes, got {}",
                PRIVATE_KEY_LEN,
                bytes.len()
            )));
        }

        let mut secret = SecretKey::from_slice(bytes)
            .map_err(|e| Error::InvalidPrivateKey(e.to_string()))?;
        let key = Self { bytes: secret.secret_bytes() };
        secret.non_secure_erase();

        Ok(key)
    }

    /// Create a private key from 64 hex characters, with or without a `0x` prefix
    pub fn from_hex(input: &str) -> Result<Self> {
        if !is_hex_key_shape(input) {
            return Err(Error::InvalidPrivateKey(
                "expected 64 hexadecimal characters".to_string(),
            ));
        }

        let bytes = Zeroizing::new(
            hex::decode(strip_hex_prefix(input)).map_err(|e| Error::InvalidPrivateKey(e.to_string()))?,
        );

        Self::from_slice(&bytes)
    }

    /// Get the raw private key bytes
    pub fn as_bytes(&self) -> &[u8; PRIVATE_KEY_LEN] {
        &self.bytes
    }

    /// Canonical lowercase hex form
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    fn secret_key(&self) -> Result<SecretKey> {
        SecretKey::from_slice(&self.bytes).map_err(|e| Error::InvalidPrivateKey(e.to_string()))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// Remove a leading `0x` from a hex string
pub fn strip_hex_prefix(input: &str) -> &str {
    input.strip_prefix("0x").unwrap_or(input)
}

/// Whether `input` is 64 hex characters after an optional `0x` prefix.
///
/// Only the shape is checked, not the scalar range.
pub fn is_hex_key_shape(input: &str) -> bool {
    let clean = strip_hex_prefix(input);
    clean.len() == PRIVATE_KEY_LEN * 2 && clean.chars().all(|c| c.is_ascii_hexdigit())
}

/// An uncompressed secp256k1 public key
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    bytes: [u8; PUBLIC_KEY_LEN],
}

impl PublicKey {
    /// Get the raw uncompressed point, `0x04 || X || Y`
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.bytes
    }

    /// Lowercase hex of the uncompressed point, 130 characters
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// The secp256k1 curve context.
///
/// Built once and shared by reference; it holds no mutable state, so one
/// value can serve every derivation across threads.
pub struct Curve {
    secp: Secp256k1<SignOnly>,
}

impl Curve {
    /// Create the secp256k1 context
    pub fn secp256k1() -> Self {
        Self { secp: Secp256k1::signing_only() }
    }

    /// Derive the public key for a private key by scalar multiplication of the generator
    pub fn derive_public_key(&self, private_key: &PrivateKey) -> Result<PublicKey> {
        let mut secret_key = private_key.secret_key()?;
        let public_key = Secp256k1PublicKey::from_secret_key(&self.secp, &secret_key);
        secret_key.non_secure_erase();

        Ok(PublicKey { bytes: public_key.serialize_uncompressed() })
    }
}

impl Default for Curve {
    fn default() -> Self {
        Self::secp256k1()
    }
}

impl fmt::Debug for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Curve(secp256k1)")
    }
}
