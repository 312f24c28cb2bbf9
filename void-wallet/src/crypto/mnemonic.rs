//! Mnemonic phrase generation and handling

use bip39::{Language, Mnemonic};
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use super::entropy::{random_bytes, EntropySource};

/// Supported mnemonic strengths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MnemonicStrength {
    /// 12 words (128 bits)
    Words12,
    /// 15 words (160 bits)
    Words15,
    /// 18 words (192 bits)
    Words18,
    /// 21 words (224 bits)
    Words21,
    /// 24 words (256 bits)
    Words24,
}

impl MnemonicStrength {
    /// Get entropy length in bytes
    pub fn entropy_bytes(&self) -> usize {
        match self {
            Self::Words12 => 16,
            Self::Words15 => 20,
            Self::Words18 => 24,
            Self::Words21 => 28,
            Self::Words24 => 32,
        }
    }

    /// Get the number of words in a phrase of this strength
    pub fn word_count(&self) -> usize {
        // 11 bits per word over entropy plus one checksum bit per 32 entropy bits
        self.entropy_bytes() * 8 * 33 / 32 / 11
    }

    /// Look up the strength for an entropy length in bytes
    pub fn from_entropy_len(len: usize) -> Option<Self> {
        match len {
            16 => Some(Self::Words12),
            20 => Some(Self::Words15),
            24 => Some(Self::Words18),
            28 => Some(Self::Words21),
            32 => Some(Self::Words24),
            _ => None,
        }
    }
}

/// Encode entropy as an English mnemonic phrase
pub fn entropy_to_mnemonic(entropy: &[u8]) -> Result<String> {
    if MnemonicStrength::from_entropy_len(entropy.len()).is_none() {
        return Err(Error::Encoding(format!(
            "unsupported entropy length: {} bytes",
            entropy.len()
        )));
    }

    let mnemonic = Mnemonic::from_entropy_in(Language::English, entropy)
        .map_err(|e| Error::Encoding(e.to_string()))?;

    Ok(mnemonic.to_string())
}

/// Decode a mnemonic phrase back into its entropy, verifying the embedded checksum
pub fn mnemonic_to_entropy(phrase: &str) -> Result<Zeroizing<Vec<u8>>> {
    let normalized = normalize_phrase(phrase);
    let mnemonic = Mnemonic::parse_in_normalized(Language::English, &normalized)
        .map_err(|e| Error::InvalidMnemonic(e.to_string()))?;

    Ok(Zeroizing::new(mnemonic.to_entropy()))
}

/// Check whether a phrase decodes: known words, supported length, matching checksum
pub fn validate_mnemonic(phrase: &str) -> bool {
    mnemonic_to_entropy(phrase).is_ok()
}

/// Generate a new random mnemonic phrase with the specified strength
pub fn generate_mnemonic(source: &dyn EntropySource, strength: MnemonicStrength) -> Result<String> {
    let entropy = random_bytes(source, strength.entropy_bytes())?;
    entropy_to_mnemonic(&entropy)
}

/// Collapse whitespace and lowercase a phrase as typed by a user
pub fn normalize_phrase(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Count the words in a phrase
pub fn word_count(phrase: &str) -> usize {
    phrase.split_whitespace().count()
}
