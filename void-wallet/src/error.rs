//! Error types for the void-wallet library

use serde::Serialize;
use thiserror::Error;

/// Custom error type for void-wallet operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("Invalid WIF: {0}")]
    InvalidWif(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Entropy source failure: {0}")]
    Entropy(String),

    #[error("Unsupported credential kind: {0}")]
    UnsupportedCredentialKind(String),

    #[error("Wrong password")]
    WrongPassword,

    #[error("Keystore error: {0}")]
    Keystore(String),
}

/// Stable classification of an [`Error`], independent of its message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidPrivateKey,
    InvalidMnemonic,
    InvalidWif,
    Encoding,
    Entropy,
    UnsupportedCredentialKind,
    WrongPassword,
    Keystore,
}

impl Error {
    /// Get the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPrivateKey(_) => ErrorKind::InvalidPrivateKey,
            Self::InvalidMnemonic(_) => ErrorKind::InvalidMnemonic,
            Self::InvalidWif(_) => ErrorKind::InvalidWif,
            Self::Encoding(_) => ErrorKind::Encoding,
            Self::Entropy(_) => ErrorKind::Entropy,
            Self::UnsupportedCredentialKind(_) => ErrorKind::UnsupportedCredentialKind,
            Self::WrongPassword => ErrorKind::WrongPassword,
            Self::Keystore(_) => ErrorKind::Keystore,
        }
    }

    /// Whether the error was caused by caller-supplied input rather than an internal failure
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::InvalidPrivateKey
                | ErrorKind::InvalidMnemonic
                | ErrorKind::InvalidWif
                | ErrorKind::UnsupportedCredentialKind
                | ErrorKind::WrongPassword
        )
    }
}

/// Result type for void-wallet operations
pub type Result<T> = std::result::Result<T, Error>;
