//! Password sealing of private keys for local persistence
//!
//! The password is stretched with Argon2id into an AES-256-GCM key. Any
//! authentication failure on unseal is reported as a wrong password.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use super::entropy::{random_bytes, EntropySource, OsEntropy};
use super::keys::PrivateKey;

/// Current sealed key format version
pub const KEYSTORE_VERSION: u8 = 1;

const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;

/// Largest accepted Argon2 memory cost, 2 GiB
pub const MAX_M_COST_KIB: u32 = 1 << 21;
/// Largest accepted number of Argon2 passes
pub const MAX_T_COST: u32 = 64;
/// Largest accepted Argon2 parallelism
pub const MAX_P_COST: u32 = 64;

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    /// Memory cost in KiB
    pub m_cost_kib: u32,
    /// Number of passes
    pub t_cost: u32,
    /// Degree of parallelism
    pub p_cost: u32,
}

impl KdfParams {
    /// Reject costs above the accepted maximums
    pub fn check_limits(&self) -> Result<()> {
        if self.m_cost_kib > MAX_M_COST_KIB || self.t_cost > MAX_T_COST || self.p_cost > MAX_P_COST {
            return Err(Error::Keystore(format!(
                "Argon2 params exceed limits: m={} KiB (max {}), t={} (max {}), p={} (max {})",
                self.m_cost_kib, MAX_M_COST_KIB, self.t_cost, MAX_T_COST, self.p_cost, MAX_P_COST
            )));
        }
        Ok(())
    }
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            m_cost_kib: Params::DEFAULT_M_COST,
            t_cost: Params::DEFAULT_T_COST,
            p_cost: Params::DEFAULT_P_COST,
        }
    }
}

/// A private key encrypted under a password
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedKey {
    pub version: u8,
    pub kdf: KdfParams,
    /// Hex-encoded Argon2 salt
    pub salt: String,
    /// Hex-encoded AES-GCM nonce
    pub nonce: String,
    /// Hex-encoded ciphertext with authentication tag
    pub ciphertext: String,
}

impl SealedKey {
    /// Serialize to a JSON string for storage
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::Keystore(e.to_string()))
    }

    /// Parse from a stored JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Keystore(e.to_string()))
    }
}

/// Encrypt a private key with a password
pub fn seal(private_key: &PrivateKey, password: &str, params: &KdfParams) -> Result<SealedKey> {
    seal_with(&OsEntropy, private_key, password, params)
}

/// Encrypt a private key with a password, drawing salt and nonce from `source`
pub fn seal_with(
    source: &dyn EntropySource,
    private_key: &PrivateKey,
    password: &str,
    params: &KdfParams,
) -> Result<SealedKey> {
    if password.is_empty() {
        return Err(Error::Keystore("password must not be empty".to_string()));
    }

    let salt = random_bytes(source, SALT_LEN)?;
    let nonce = random_bytes(source, NONCE_LEN)?;
    let key = derive_key(password, &salt, params)?;

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_slice()));
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), private_key.as_bytes().as_slice())
        .map_err(|e| Error::Keystore(e.to_string()))?;

    Ok(SealedKey {
        version: KEYSTORE_VERSION,
        kdf: *params,
        salt: hex::encode(salt.as_slice()),
        nonce: hex::encode(nonce.as_slice()),
        ciphertext: hex::encode(ciphertext),
    })
}

/// Decrypt a sealed private key with a password
pub fn unseal(sealed: &SealedKey, password: &str) -> Result<PrivateKey> {
    if sealed.version != KEYSTORE_VERSION {
        return Err(Error::Keystore(format!(
            "unsupported keystore version {}",
            sealed.version
        )));
    }

    let salt = decode_field("salt", &sealed.salt)?;
    let nonce = decode_field("nonce", &sealed.nonce)?;
    let ciphertext = decode_field("ciphertext", &sealed.ciphertext)?;

    if nonce.len() != NONCE_LEN {
        return Err(Error::Keystore(format!(
            "nonce must be {} bytes, got {}",
            NONCE_LEN,
            nonce.len()
        )));
    }

    let key = derive_key(password, &salt, &sealed.kdf)?;
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_slice()));
    let plaintext = Zeroizing::new(
        cipher
            .decrypt(Nonce::from_slice(&nonce), ciphertext.as_slice())
            .map_err(|_| Error::WrongPassword)?,
    );

    PrivateKey::from_slice(&plaintext).map_err(|e| Error::Keystore(e.to_string()))
}

fn derive_key(password: &str, salt: &[u8], params: &KdfParams) -> Result<Zeroizing<[u8; KEY_LEN]>> {
    params.check_limits()?;
    let argon_params = Params::new(params.m_cost_kib, params.t_cost, params.p_cost, Some(KEY_LEN))
        .map_err(|e| Error::Keystore(format!("invalid Argon2 params: {}", e)))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon_params);

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut key[..])
        .map_err(|e| Error::Keystore(format!("key stretching failed: {}", e)))?;

    Ok(key)
}

fn decode_field(name: &str, value: &str) -> Result<Vec<u8>> {
    hex::decode(value).map_err(|e| Error::Keystore(format!("malformed {}: {}", name, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light() -> KdfParams {
        KdfParams { m_cost_kib: 64, t_cost: 1, p_cost: 1 }
    }

    fn key() -> PrivateKey {
        PrivateKey::from_hex(&"5a".repeat(32)).unwrap()
    }

    #[test]
    fn test_seal_and_unseal() {
        let sealed = seal(&key(), "correct horse", &light()).unwrap();
        assert_eq!(sealed.version, KEYSTORE_VERSION);
        assert!(!sealed.ciphertext.contains(&key().to_hex()));

        let opened = unseal(&sealed, "correct horse").unwrap();
        assert_eq!(opened, key());
    }

    #[test]
    fn test_oversized_kdf_params_rejected() {
        let mut sealed = seal(&key(), "pw", &light()).unwrap();
        sealed.kdf.m_cost_kib = u32::MAX;
        assert!(matches!(unseal(&sealed, "pw"), Err(Error::Keystore(_))));

        let mut sealed = seal(&key(), "pw", &light()).unwrap();
        sealed.kdf.t_cost = MAX_T_COST + 1;
        assert!(matches!(unseal(&sealed, "pw"), Err(Error::Keystore(_))));

        let heavy = KdfParams { p_cost: MAX_P_COST + 1, ..light() };
        assert!(matches!(seal(&key(), "pw", &heavy), Err(Error::Keystore(_))));
    }

    #[test]
    fn test_default_params_within_limits() {
        KdfParams::default().check_limits().unwrap();
    }

    #[test]
    fn test_wrong_password() {
        let sealed = seal(&key(), "correct horse", &light()).unwrap();
        assert!(matches!(unseal(&sealed, "battery staple"), Err(Error::WrongPassword)));
    }

    #[test]
    fn test_tampered_ciphertext_reads_as_wrong_password() {
        let mut sealed = seal(&key(), "pw", &light()).unwrap();
        let mut bytes = hex::decode(&sealed.ciphertext).unwrap();
        bytes[0] ^= 0x01;
        sealed.ciphertext = hex::encode(bytes);

        assert!(matches!(unseal(&sealed, "pw"), Err(Error::WrongPassword)));
    }

    #[test]
    fn test_salts_differ_between_seals() {
        let a = seal(&key(), "pw", &light()).unwrap();
        let b = seal(&key(), "pw", &light()).unwrap();
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn test_empty_password_rejected() {
        assert!(matches!(seal(&key(), "", &light()), Err(Error::Keystore(_))));
    }

    #[test]
    fn test_malformed_fields() {
        let mut sealed = seal(&key(), "pw", &light()).unwrap();
        sealed.nonce = "abcd".to_string();
        assert!(matches!(unseal(&sealed, "pw"), Err(Error::Keystore(_))));

        sealed.nonce = "not hex".to_string();
        assert!(matches!(unseal(&sealed, "pw"), Err(Error::Keystore(_))));
    }

    #[test]
    fn test_json_round_trip() {
        let sealed = seal(&key(), "pw", &light()).unwrap();
        let json = sealed.to_json().unwrap();
        let parsed = SealedKey::from_json(&json).unwrap();

        assert_eq!(parsed, sealed);
        assert_eq!(unseal(&parsed, "pw").unwrap(), key());
    }
}
