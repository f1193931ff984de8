//! Seed derivation and phrase validation.
//!
//! - **Password**: `normalize_text(phrase)`.
//! - **Salt**: `"electrum"` followed by `normalize_text(passphrase)`.
//! - **Algorithm**: PBKDF2-HMAC-SHA512, 2048 rounds, 64-byte output.
//!
//! Unless the caller opts out, the phrase must carry one of the accepted
//! seed-version prefixes before any key stretching is done.

use electrum_mnemonic_types::config::SeedOptions;
use electrum_mnemonic_types::{validate_prefix_format, MnemonicError, Result};
use hmac::Hmac;
use sha2::Sha512;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::normalize::normalize_text;
use crate::prefix::check_prefix;

/// Fixed prefix of the PBKDF2 salt.
pub const SEED_SALT_PREFIX: &str = "electrum";

/// PBKDF2 iteration count.
pub const PBKDF2_ROUNDS: u32 = 2048;

// ---------------------------------------------------------------------------
// Seed
// ---------------------------------------------------------------------------

/// A 64-byte seed derived from a mnemonic via PBKDF2-HMAC-SHA512.
///
/// This is the input to BIP32 master key derivation. Automatically
/// zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; 64]);

impl Seed {
    /// Fixed byte length of a seed.
    pub const LEN: usize = 64;

    /// Creates a [`Seed`] from a raw 64-byte array.
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Returns the raw 64-byte seed.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

// Seed does not implement Clone/Debug to prevent leakage.

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Validated, normalized KDF inputs.
struct KdfInput {
    password: String,
    salt: String,
}

impl Drop for KdfInput {
    fn drop(&mut self) {
        self.password.zeroize();
        self.salt.zeroize();
    }
}

/// Runs every check that precedes key stretching.
fn prepare(phrase: &str, opts: &SeedOptions) -> Result<KdfInput> {
    opts.validate()?;

    debug!(
        skip_check = opts.skip_check,
        accepted_prefixes = opts.valid_prefixes.len(),
        "deriving seed"
    );

    if !opts.skip_check {
        check_prefix(phrase, opts.valid_prefixes.as_slice())?;
    }

    let mut passphrase = normalize_text(&opts.passphrase);
    let mut salt = String::with_capacity(SEED_SALT_PREFIX.len() + passphrase.len());
    salt.push_str(SEED_SALT_PREFIX);
    salt.push_str(&passphrase);
    passphrase.zeroize();

    Ok(KdfInput {
        password: normalize_text(phrase),
        salt,
    })
}

fn stretch(input: &KdfInput) -> Result<Seed> {
    let mut output = [0u8; Seed::LEN];

    pbkdf2::pbkdf2::<Hmac<Sha512>>(
        input.password.as_bytes(),
        input.salt.as_bytes(),
        PBKDF2_ROUNDS,
        &mut output,
    )
    .map_err(|e| MnemonicError::CryptoError {
        reason: format!("PBKDF2-HMAC-SHA512 failed: {e}"),
    })?;

    Ok(Seed(output))
}

/// Derives the 64-byte seed of `phrase`.
///
/// # Parameters
///
/// - `phrase`: the mnemonic, in any Unicode form; it is normalized here.
/// - `opts`: passphrase, accepted prefixes and the skip-check flag.
///
/// # Errors
///
/// - Any error of [`SeedOptions::validate`].
/// - [`MnemonicError::InvalidSeedVersion`] if the phrase carries none of
///   `opts.valid_prefixes` and `opts.skip_check` is not set.
/// - [`MnemonicError::CryptoError`] if PBKDF2 fails.
pub fn mnemonic_to_seed(phrase: &str, opts: &SeedOptions) -> Result<Seed> {
    let input = prepare(phrase, opts)?;
    stretch(&input)
}

/// Async form of [`mnemonic_to_seed`].
///
/// Options and the seed version are checked on the calling task; PBKDF2
/// runs on the blocking thread pool so it never stalls the executor.
/// Dropping the future does not cancel the blocking job.
///
/// # Errors
///
/// As [`mnemonic_to_seed`], plus [`MnemonicError::TaskFailed`] if the
/// blocking job panics or the runtime shuts down.
pub async fn mnemonic_to_seed_async(phrase: &str, opts: &SeedOptions) -> Result<Seed> {
    let input = prepare(phrase, opts)?;

    tokio::task::spawn_blocking(move || stretch(&input))
        .await
        .map_err(|e| MnemonicError::TaskFailed {
            reason: format!("seed derivation task: {e}"),
        })?
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Returns whether `phrase` carries `prefix`.
///
/// # Errors
///
/// Returns [`MnemonicError::InvalidPrefixFormat`] for a malformed prefix.
/// A phrase with the wrong seed version is `Ok(false)`, not an error.
pub fn validate_mnemonic(phrase: &str, prefix: &str) -> Result<bool> {
    validate_prefix_format(prefix)?;
    match check_prefix(phrase, &[prefix]) {
        Ok(()) => Ok(true),
        Err(MnemonicError::InvalidSeedVersion) => Ok(false),
        Err(e) => Err(e),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
