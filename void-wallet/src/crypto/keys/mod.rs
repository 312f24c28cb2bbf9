//! Key derivation and management
//!
//! This module provides the private and public key types, the curve context
//! used to derive one from the other, and the Wallet Import Format codec.

pub mod derivation;
pub mod wif;

pub use derivation::*;
pub use wif::*;
