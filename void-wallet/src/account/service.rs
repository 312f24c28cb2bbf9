//! Account operations composed from the key primitives

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use crate::crypto::entropy::{generate_private_key_from, EntropySource, OsEntropy};
use crate::crypto::keys::{
    decode_wif_with, encode_wif, is_hex_key_shape, ChecksumPolicy, Curve, PrivateKey, PublicKey,
};
use crate::crypto::mnemonic::{entropy_to_mnemonic, mnemonic_to_entropy, normalize_phrase, word_count};
use crate::error::{Error, Result};
use super::address::Address;

/// Facade configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccountConfig {
    /// Checksum handling when importing WIF strings
    pub wif_checksum: ChecksumPolicy,
}

/// Every representation of one keypair identity.
///
/// All fields are functions of the private key; [`Account::verify`] checks that.
#[derive(Clone)]
pub struct Account {
    private_key: PrivateKey,
    mnemonic: Zeroizing<String>,
    public_key: PublicKey,
    address: Address,
    wif: Zeroizing<String>,
}

impl Account {
    /// Get the private key
    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    /// Get the 24-word mnemonic phrase
    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    /// Get the public key
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Get the address
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Get the WIF encoding of the private key
    pub fn wif(&self) -> &str {
        &self.wif
    }

    /// Number of words in the mnemonic
    pub fn word_count(&self) -> usize {
        word_count(&self.mnemonic)
    }

    /// Re-derive every field from the private key and compare
    pub fn verify(&self, curve: &Curve) -> Result<()> {
        let public_key = curve.derive_public_key(&self.private_key)?;
        if public_key != self.public_key {
            return Err(Error::Encoding("public key does not match private key".to_string()));
        }

        if Address::from_public_key(&public_key) != self.address {
            return Err(Error::Encoding("address does not match public key".to_string()));
        }

        if encode_wif(&self.private_key).as_str() != self.wif.as_str() {
            return Err(Error::Encoding("WIF does not match private key".to_string()));
        }

        let entropy = mnemonic_to_entropy(&self.mnemonic)?;
        if entropy.as_slice() != self.private_key.as_bytes().as_slice() {
            return Err(Error::Encoding("mnemonic does not match private key".to_string()));
        }

        Ok(())
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("public_key", &self.public_key)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// The kind of credential presented for validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialKind {
    #[serde(rename = "mnemonic")]
    Mnemonic,
    #[serde(rename = "privateKey")]
    PrivateKey,
}

impl CredentialKind {
    /// Wire name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mnemonic => "mnemonic",
            Self::PrivateKey => "privateKey",
        }
    }
}

impl FromStr for CredentialKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mnemonic" => Ok(Self::Mnemonic),
            "privateKey" => Ok(Self::PrivateKey),
            other => Err(Error::UnsupportedCredentialKind(other.to_string())),
        }
    }
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Public identity behind a validated credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialInfo {
    pub kind: CredentialKind,
    pub public_key: PublicKey,
    pub address: Address,
}

/// Generates, imports and validates accounts.
///
/// Holds no per-call state; a single instance can be shared across threads.
#[derive(Clone)]
pub struct AccountService {
    curve: Arc<Curve>,
    entropy: Arc<dyn EntropySource>,
    config: AccountConfig,
}

impl AccountService {
    /// Create a service drawing entropy from the operating system
    pub fn new(config: AccountConfig) -> Self {
        Self::with_entropy(config, Arc::new(OsEntropy))
    }

    /// Create a service with a custom entropy source
    pub fn with_entropy(config: AccountConfig, entropy: Arc<dyn EntropySource>) -> Self {
        Self {
            curve: Arc::new(Curve::secp256k1()),
            entropy,
            config,
        }
    }

    /// Get the curve context
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// Get the configuration
    pub fn config(&self) -> &AccountConfig {
        &self.config
    }

    /// Generate a new account from fresh entropy
    pub fn generate(&self) -> Result<Account> {
        let private_key = generate_private_key_from(self.entropy.as_ref())?;
        let account = self.derive_account(private_key)?;
        debug!(address = %account.address, "generated account");
        Ok(account)
    }

    /// Import an account from a 24-word mnemonic phrase
    pub fn import_mnemonic(&self, phrase: &str) -> Result<Account> {
        let private_key = self.mnemonic_to_private_key(phrase)?;
        let account = self.derive_account(private_key)?;
        debug!(address = %account.address, "imported account from mnemonic");
        Ok(account)
    }

    /// Import an account from a WIF string or a hex private key.
    ///
    /// Input shaped like a hex key is always read as hex. A WIF string is
    /// never 64 characters, and some hex keys are also valid Base58 that
    /// decodes to a different key when the checksum is skipped.
    pub fn import_private_key(&self, input: &str) -> Result<Account> {
        let input = input.trim();
        let private_key = if is_hex_key_shape(input) {
            PrivateKey::from_hex(input)?
        } else {
            decode_wif_with(input, self.config.wif_checksum).map_err(|_| {
                Error::InvalidPrivateKey("not a valid hex private key or WIF".to_string())
            })?
        };

        let account = self.derive_account(private_key)?;
        debug!(address = %account.address, "imported account from private key");
        Ok(account)
    }

    /// Validate a credential and return its public identity without the private key
    pub fn validate_credential(&self, kind: CredentialKind, credential: &str) -> Result<CredentialInfo> {
        let private_key = match kind {
            CredentialKind::Mnemonic => self.mnemonic_to_private_key(credential)?,
            CredentialKind::PrivateKey => PrivateKey::from_hex(credential.trim())?,
        };

        let public_key = self.curve.derive_public_key(&private_key)?;
        let address = Address::from_public_key(&public_key);
        debug!(%kind, %address, "validated credential");

        Ok(CredentialInfo { kind, public_key, address })
    }

    /// Derive the full account for a private key
    pub fn derive_account(&self, private_key: PrivateKey) -> Result<Account> {
        let public_key = self.curve.derive_public_key(&private_key)?;
        let address = Address::from_public_key(&public_key);
        let mnemonic = Zeroizing::new(entropy_to_mnemonic(private_key.as_bytes())?);
        let wif = Zeroizing::new(encode_wif(&private_key));

        Ok(Account {
            private_key,
            mnemonic,
            public_key,
            address,
            wif,
        })
    }

    fn mnemonic_to_private_key(&self, phrase: &str) -> Result<PrivateKey> {
        let entropy = mnemonic_to_entropy(&normalize_phrase(phrase))?;

        // Only 256-bit phrases map one-to-one onto a private key
        PrivateKey::from_slice(&entropy).map_err(|_| {
            Error::InvalidMnemonic(format!(
                "expected a 24-word phrase encoding a valid private key, got {} words",
                word_count(phrase)
            ))
        })
    }
}

impl Default for AccountService {
    fn default() -> Self {
        Self::new(AccountConfig::default())
    }
}

impl fmt::Debug for AccountService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountService")
            .field("curve", &self.curve)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
