//! Account management functionality
//!
//! This module derives user-facing addresses, validates untrusted key
//! material, and composes the crypto primitives into account operations.

pub mod address;
pub mod validation;
mod service;

pub use address::*;
pub use validation::*;
pub use service::*;
