//! Seed-version fingerprints and prefix matching.
//!
//! The version of a phrase is not stored in the words. It is read from
//! the leading hex digits of
//! `HMAC-SHA512(key = "Seed version", msg = normalize_text(phrase))`.
//! A phrase "carries" a prefix when that hex digest starts with it.

use electrum_mnemonic_types::{MnemonicError, Result, SeedVersion};

use crate::mac::hmac_sha512;
use crate::normalize::normalize_text;

pub use electrum_mnemonic_types::validate_prefix_format;

/// HMAC key of the seed-version fingerprint.
pub const SEED_VERSION_KEY: &[u8] = b"Seed version";

/// Returns the full lowercase hex fingerprint of `phrase`.
///
/// # Errors
///
/// Returns [`MnemonicError::CryptoError`] if the HMAC fails.
pub fn seed_fingerprint(phrase: &str) -> Result<String> {
    let normalized = normalize_text(phrase);
    let tag = hmac_sha512(SEED_VERSION_KEY, normalized.as_bytes())?;
    Ok(hex::encode(tag))
}

fn fingerprint_starts_with(fingerprint: &str, prefix: &str) -> bool {
    fingerprint.starts_with(&prefix.to_lowercase())
}

/// Tests `phrase` against each prefix, in order.
///
/// Prefixes are lowercased before comparison. The fingerprint is computed
/// once regardless of the number of prefixes.
pub fn prefix_matches<S: AsRef<str>>(phrase: &str, prefixes: &[S]) -> Result<Vec<bool>> {
    let fingerprint = seed_fingerprint(phrase)?;
    Ok(prefixes
        .iter()
        .map(|p| fingerprint_starts_with(&fingerprint, p.as_ref()))
        .collect())
}

/// Returns `true` if `phrase` carries at least one of `prefixes`.
pub fn matches_any_prefix<S: AsRef<str>>(phrase: &str, prefixes: &[S]) -> Result<bool> {
    let fingerprint = seed_fingerprint(phrase)?;
    Ok(prefixes
        .iter()
        .any(|p| fingerprint_starts_with(&fingerprint, p.as_ref())))
}

/// Fails unless `phrase` carries at least one of `prefixes`.
///
/// # Errors
///
/// Returns [`MnemonicError::InvalidSeedVersion`] when nothing matches.
pub fn check_prefix<S: AsRef<str>>(phrase: &str, prefixes: &[S]) -> Result<()> {
    if matches_any_prefix(phrase, prefixes)? {
        Ok(())
    } else {
        Err(MnemonicError::InvalidSeedVersion)
    }
}

/// Detects which named seed version `phrase` carries, if any.
///
/// When more than one version matches, the longest prefix wins.
pub fn seed_version(phrase: &str) -> Result<Option<SeedVersion>> {
    let fingerprint = seed_fingerprint(phrase)?;
    Ok(SeedVersion::ALL
        .into_iter()
        .filter(|v| fingerprint.starts_with(v.prefix()))
        .max_by_key(|v| v.prefix().len()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const ENCODED_PHRASE: &str =
        "worth above amount gauge agree coral search bamboo pass maid crouch sea";

    #[test]
    fn fingerprint_known_values() -> std::result::Result<(), MnemonicError> {
        assert!(seed_fingerprint("")?.starts_with("d71e0e7caffa74ba"));
        assert!(seed_fingerprint("abandon")?.starts_with("29a3109ae41761e6"));
        assert!(seed_fingerprint(ENCODED_PHRASE)?.starts_with("a6fbac2ef908366e"));
        Ok(())
    }

    #[test]
    fn fingerprint_is_full_digest() -> std::result::Result<(), MnemonicError> {
        let fp = seed_fingerprint("abandon")?;
        assert_eq!(fp.len(), 128);
        assert!(fp.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()));
        Ok(())
    }

    #[test]
    fn fingerprint_normalizes_first() -> std::result::Result<(), MnemonicError> {
        assert_eq!(seed_fingerprint("ABANDON")?, seed_fingerprint("abandon")?);
        Ok(())
    }

    #[test]
    fn matches_in_order() -> std::result::Result<(), MnemonicError> {
        let result = prefix_matches(ENCODED_PHRASE, &["a6f", "100", "a", "a6fbac2e"])?;
        assert_eq!(result, vec![true, false, true, true]);
        Ok(())
    }

    #[test]
    fn uppercase_prefix_matches() -> std::result::Result<(), MnemonicError> {
        assert!(matches_any_prefix(ENCODED_PHRASE, &["A6FB"])?);
        Ok(())
    }

    #[test]
    fn empty_prefix_list_matches_nothing() -> std::result::Result<(), MnemonicError> {
        let none: [&str; 0] = [];
        assert!(prefix_matches(ENCODED_PHRASE, &none)?.is_empty());
        assert!(!matches_any_prefix(ENCODED_PHRASE, &none)?);
        Ok(())
    }

    #[test]
    fn check_prefix_reports_seed_version() {
        assert!(check_prefix(ENCODED_PHRASE, &["a6"]).is_ok());
        assert!(matches!(
            check_prefix(ENCODED_PHRASE, &["100", "01"]),
            Err(MnemonicError::InvalidSeedVersion)
        ));
    }

    #[test]
    fn unversioned_phrase_has_no_seed_version() -> std::result::Result<(), MnemonicError> {
        assert_eq!(seed_version(ENCODED_PHRASE)?, None);
        Ok(())
    }
}
