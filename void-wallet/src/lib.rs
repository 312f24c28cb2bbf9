//! Void Wallet Core - keypair identity in several equivalent representations
//!
//! This library turns a secp256k1 private key into its mnemonic phrase,
//! Wallet Import Format string, uncompressed public key and short address,
//! and recovers the same private key from any of those inputs.

pub mod error;
pub mod crypto;
pub mod account;

// Re-export commonly used types for convenience
pub use error::{Error, ErrorKind, Result};
pub use account::{Account, AccountConfig, AccountService, CredentialInfo, CredentialKind};
pub use crypto::keys::{Curve, PrivateKey, PublicKey};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
