//! Cryptographically secure entropy for new private keys

use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use super::keys::{PrivateKey, PRIVATE_KEY_LEN};

/// Draws for a valid scalar before giving up. A 32-byte draw falls outside
/// the secp256k1 order with probability below 2^-127.
const MAX_KEY_DRAWS: usize = 4;

/// A source of cryptographically secure random bytes
pub trait EntropySource: Send + Sync {
    /// Fill `dest` entirely with random bytes, or fail without a weaker fallback
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<()>;
}

/// Entropy drawn from the operating system generator
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| Error::Entropy(e.to_string()))
    }
}

/// Draw `len` random bytes from `source` into a buffer that is wiped on drop
pub fn random_bytes(source: &dyn EntropySource, len: usize) -> Result<Zeroizing<Vec<u8>>> {
    let mut buf = Zeroizing::new(vec![0u8; len]);
    source.fill_bytes(&mut buf)?;
    Ok(buf)
}

/// Generate a fresh private key from `source`
pub fn generate_private_key_from(source: &dyn EntropySource) -> Result<PrivateKey> {
    for _ in 0..MAX_KEY_DRAWS {
        let bytes = random_bytes(source, PRIVATE_KEY_LEN)?;
        // Only out-of-range draws are retried; the source itself has already succeeded.
        if let Ok(key) = PrivateKey::from_slice(&bytes) {
            return Ok(key);
        }
    }

    Err(Error::Entropy(format!(
        "no valid scalar after {} draws",
        MAX_KEY_DRAWS
    )))
}

/// Generate a fresh private key from the operating system generator
pub fn generate_private_key() -> Result<PrivateKey> {
    generate_private_key_from(&OsEntropy)
}
