//! Core shared types for the electrum-mnemonic workspace.
//!
//! This crate defines the error type, the named seed versions and the
//! per-operation option structs. The algorithms live in
//! `electrum-mnemonic-core`; everything both sides need to agree on
//! lives here.

pub mod config;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Prefix format
// ---------------------------------------------------------------------------

/// Maximum length of a seed-version prefix, in hex characters.
///
/// An HMAC-SHA512 digest is 64 bytes, i.e. 128 hex characters; a longer
/// prefix could never match.
pub const MAX_PREFIX_LEN: usize = 128;

/// Checks that `prefix` is a non-empty lowercase hex string of at most
/// [`MAX_PREFIX_LEN`] characters.
///
/// # Errors
///
/// Returns [`MnemonicError::InvalidPrefixFormat`] otherwise. Uppercase
/// digits are rejected here; matching itself is case-insensitive.
pub fn validate_prefix_format(prefix: &str) -> Result<()> {
    let well_formed = !prefix.is_empty()
        && prefix.len() <= MAX_PREFIX_LEN
        && prefix.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));

    if !well_formed {
        return Err(MnemonicError::InvalidPrefixFormat {
            prefix: prefix.to_owned(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// SeedVersion
// ---------------------------------------------------------------------------

/// Named seed versions of the Electrum mnemonic protocol.
///
/// Each version is identified by the leading hex digits of
/// `HMAC-SHA512("Seed version", normalized_phrase)`. The version tells a
/// wallet which script type and derivation scheme the seed was created
/// for.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum SeedVersion {
    /// Legacy P2PKH wallets (`"01"`).
    #[serde(rename = "standard")]
    Standard,
    /// Native SegWit wallets (`"100"`).
    #[default]
    #[serde(rename = "segwit")]
    Segwit,
    /// Two-factor legacy wallets (`"101"`).
    #[serde(rename = "2fa")]
    TwoFactor,
    /// Two-factor SegWit wallets (`"102"`).
    #[serde(rename = "2fa-segwit")]
    TwoFactorSegwit,
}

impl SeedVersion {
    /// Every named version, in protocol order.
    pub const ALL: [SeedVersion; 4] = [
        Self::Standard,
        Self::Segwit,
        Self::TwoFactor,
        Self::TwoFactorSegwit,
    ];

    /// Returns the hex prefix identifying this version.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Standard => "01",
            Self::Segwit => "100",
            Self::TwoFactor => "101",
            Self::TwoFactorSegwit => "102",
        }
    }

    /// Returns the protocol name of this version.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Segwit => "segwit",
            Self::TwoFactor => "2fa",
            Self::TwoFactorSegwit => "2fa-segwit",
        }
    }
}

impl fmt::Display for SeedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SeedVersion {
    type Err = MnemonicError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|version| version.name() == s)
            .ok_or_else(|| MnemonicError::ConfigError {
                reason: format!("unknown seed version: {s:?}"),
            })
    }
}

// ---------------------------------------------------------------------------
// MnemonicError
// ---------------------------------------------------------------------------

/// Central error type for the electrum-mnemonic workspace.
///
/// Every fallible operation in the workspace returns this enum, so
/// callers can match on the failure kind instead of parsing messages.
#[derive(Debug, Error)]
pub enum MnemonicError {
    /// A phrase contains a word that is not part of the word list.
    #[error("Unknown Word: {word}\nWordlist: {wordlist}")]
    UnknownWord {
        /// The offending word, exactly as it appeared in the phrase.
        word: String,
        /// Truncated rendering of the word list, for diagnostics.
        wordlist: String,
    },

    /// A seed-version prefix is not a bounded lowercase hex string.
    #[error("prefix must be a hex string of 1 to 128 lowercase digits, got {prefix:?}")]
    InvalidPrefixFormat {
        /// The rejected prefix.
        prefix: String,
    },

    /// The requested entropy is too small for the prefix length, which
    /// would make the generation search impractically long.
    #[error(
        "strength must be at least 2x of prefix bit count to lower endless loop probability.\n\
         prefix: {prefix} ({prefix_bits} bits)\nstrength: {strength}"
    )]
    StrengthTooLow {
        /// The requested prefix.
        prefix: String,
        /// Bits fixed by the prefix (`4 * prefix.len()`).
        prefix_bits: usize,
        /// The requested strength in bits.
        strength: usize,
    },

    /// The phrase fingerprint matches none of the accepted prefixes.
    #[error("Invalid Seed Version for mnemonic")]
    InvalidSeedVersion,

    /// A caller-supplied word list cannot be used for encoding.
    #[error("invalid word list: {reason}")]
    InvalidWordList {
        /// Human-readable description of the problem.
        reason: String,
    },

    /// An encoded chunk does not address any word of a word list whose
    /// length is not a power of two.
    #[error("word index {index} out of range for word list of {len} words")]
    WordIndexOutOfRange {
        /// The decoded chunk value.
        index: usize,
        /// Length of the word list.
        len: usize,
    },

    /// Generation reached its configured attempt cap without a match.
    #[error("no mnemonic matched the prefix within {attempts} attempts")]
    GenerationExhausted {
        /// Number of candidates tried.
        attempts: u64,
    },

    /// An option value is invalid.
    #[error("config error: {reason}")]
    ConfigError {
        /// Human-readable description of the configuration problem.
        reason: String,
    },

    /// An underlying cryptographic primitive failed.
    #[error("crypto error: {reason}")]
    CryptoError {
        /// Human-readable description of the cryptographic failure.
        reason: String,
    },

    /// A background task did not run to completion.
    #[error("background task failed: {reason}")]
    TaskFailed {
        /// Human-readable description of the task failure.
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Result alias
// ---------------------------------------------------------------------------

/// Convenience result type using [`MnemonicError`].
pub type Result<T> = std::result::Result<T, MnemonicError>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
