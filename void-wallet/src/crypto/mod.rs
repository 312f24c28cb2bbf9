//! Cryptographic primitives and operations
//!
//! This module provides the entropy source, the mnemonic codec, private and
//! public key handling, the WIF codec and password sealing of private keys.

pub mod entropy;
pub mod mnemonic;
pub mod keys;
pub mod keystore;

pub use entropy::*;
pub use mnemonic::*;
pub use keys::*;
