//! Per-operation options with documented defaults.
//!
//! Every public operation of the core crate takes one of these structs.
//! Callers override individual fields with struct-update syntax and the
//! operation calls [`validate`](GenerateOptions::validate) before doing
//! any work.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{validate_prefix_format, MnemonicError, Result, SeedVersion};

/// Default generation strength: 12 words of an 11-bit word list.
pub const DEFAULT_STRENGTH: usize = 132;

/// Default number of candidates the async generator tries between
/// yields to the executor.
pub const DEFAULT_YIELD_INTERVAL: usize = 50;

/// Largest accepted generation strength in bits.
pub const MAX_STRENGTH: usize = 4096;

// ---------------------------------------------------------------------------
// GenerateOptions
// ---------------------------------------------------------------------------

/// Options for mnemonic generation.
///
/// # Defaults
///
/// | Field            | Default  | Meaning |
/// |------------------|----------|---------|
/// | `prefix`         | `"100"`  | Seed version the phrase must carry (segwit) |
/// | `strength`       | 132      | Entropy bits (12 words × 11 bits), at most [`MAX_STRENGTH`] |
/// | `yield_interval` | 50       | Async only: candidates between yields |
/// | `max_attempts`   | `None`   | Optional cap on candidates tried |
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Lowercase hex prefix the phrase fingerprint must start with.
    pub prefix: String,

    /// Entropy strength in bits. Must be at least `8 * prefix.len()` and
    /// at most [`MAX_STRENGTH`].
    pub strength: usize,

    /// Number of candidates the async generator tries before yielding
    /// to the executor. Must be greater than 0.
    pub yield_interval: usize,

    /// Optional cap on the number of candidates. `None` searches until a
    /// match is found.
    pub max_attempts: Option<u64>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            prefix: SeedVersion::Segwit.prefix().to_owned(),
            strength: DEFAULT_STRENGTH,
            yield_interval: DEFAULT_YIELD_INTERVAL,
            max_attempts: None,
        }
    }
}

impl GenerateOptions {
    /// Default options targeting the given named seed version.
    pub fn for_version(version: SeedVersion) -> Self {
        Self {
            prefix: version.prefix().to_owned(),
            ..Self::default()
        }
    }

    /// Validates all option values.
    ///
    /// # Errors
    ///
    /// - [`MnemonicError::InvalidPrefixFormat`] for a malformed prefix.
    /// - [`MnemonicError::StrengthTooLow`] when
    ///   `prefix.len() * 4 > strength / 2`.
    /// - [`MnemonicError::ConfigError`] for a strength above
    ///   [`MAX_STRENGTH`], a zero yield interval or a zero attempt cap.
    pub fn validate(&self) -> Result<()> {
        validate_prefix_format(&self.prefix)?;

        // prefix_bits > strength / 2, kept in integers.
        let prefix_bits = self.prefix.len() * 4;
        if prefix_bits * 2 > self.strength {
            return Err(MnemonicError::StrengthTooLow {
                prefix: self.prefix.clone(),
                prefix_bits,
                strength: self.strength,
            });
        }

        if self.strength > MAX_STRENGTH {
            return Err(MnemonicError::ConfigError {
                reason: format!("strength must be at most {MAX_STRENGTH} bits"),
            });
        }

        if self.yield_interval == 0 {
            return Err(MnemonicError::ConfigError {
                reason: "yield_interval must be greater than 0".into(),
            });
        }

        if self.max_attempts == Some(0) {
            return Err(MnemonicError::ConfigError {
                reason: "max_attempts must be greater than 0 when set".into(),
            });
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SeedOptions
// ---------------------------------------------------------------------------

/// Options for seed derivation.
///
/// # Defaults
///
/// | Field            | Default   | Meaning |
/// |------------------|-----------|---------|
/// | `passphrase`     | `""`      | Optional extension words |
/// | `valid_prefixes` | `["100"]` | Accepted seed versions (segwit) |
/// | `skip_check`     | `false`   | Derive without checking the version |
#[derive(Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedOptions {
    /// Passphrase mixed into the PBKDF2 salt.
    pub passphrase: String,

    /// Prefixes the phrase fingerprint may start with. At least one.
    pub valid_prefixes: Vec<String>,

    /// Skip the seed-version check entirely.
    pub skip_check: bool,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            passphrase: String::new(),
            valid_prefixes: vec![SeedVersion::Segwit.prefix().to_owned()],
            skip_check: false,
        }
    }
}

impl SeedOptions {
    /// Default options accepting exactly one prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            valid_prefixes: vec![prefix.into()],
            ..Self::default()
        }
    }

    /// Default options accepting any of the given prefixes.
    pub fn with_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            valid_prefixes: prefixes.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Default options accepting every named [`SeedVersion`].
    pub fn any_version() -> Self {
        Self::with_prefixes(SeedVersion::ALL.map(SeedVersion::prefix))
    }

    /// Validates all option values.
    ///
    /// # Errors
    ///
    /// - [`MnemonicError::ConfigError`] if `valid_prefixes` is empty.
    /// - [`MnemonicError::InvalidPrefixFormat`] for any malformed prefix.
    ///
    /// Prefixes are checked even when `skip_check` is set.
    pub fn validate(&self) -> Result<()> {
        if self.valid_prefixes.is_empty() {
            return Err(MnemonicError::ConfigError {
                reason: "valid_prefixes must contain at least one prefix".into(),
            });
        }

        for prefix in &self.valid_prefixes {
            validate_prefix_format(prefix)?;
        }

        Ok(())
    }
}

impl fmt::Debug for SeedOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedOptions")
            .field("passphrase", &"<redacted>")
            .field("valid_prefixes", &self.valid_prefixes)
            .field("skip_check", &self.skip_check)
            .finish()
    }
}
