//! HMAC-SHA512 message authentication codes.
//!
//! The seed-version fingerprint of a phrase is an HMAC-SHA512 tag keyed
//! with a fixed protocol string.

use electrum_mnemonic_types::{MnemonicError, Result};
use hmac::{Hmac, Mac};
use sha2::Sha512;

/// HMAC-SHA512 type alias.
type HmacSha512 = Hmac<Sha512>;

/// Fixed output length of HMAC-SHA512 in bytes.
pub const HMAC_SHA512_LEN: usize = 64;

/// Computes HMAC-SHA512 over `data` using `key`.
///
/// # Parameters
///
/// - `key`: HMAC key (any length).
/// - `data`: data to authenticate.
///
/// # Returns
///
/// A 64-byte HMAC-SHA512 tag.
///
/// # Errors
///
/// Returns [`MnemonicError::CryptoError`] if HMAC initialisation fails.
pub fn hmac_sha512(key: &[u8], data: &[u8]) -> Result<[u8; HMAC_SHA512_LEN]> {
    let mut mac = HmacSha512::new_from_slice(key).map_err(|e| MnemonicError::CryptoError {
        reason: format!("HMAC-SHA512 key init failed: {e}"),
    })?;
    mac.update(data);
    let result = mac.finalize().into_bytes();

    let mut output = [0u8; HMAC_SHA512_LEN];
    output.copy_from_slice(&result);
    Ok(output)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hmac_is_deterministic() -> std::result::Result<(), MnemonicError> {
        let tag1 = hmac_sha512(b"Seed version", b"abandon")?;
        let tag2 = hmac_sha512(b"Seed version", b"abandon")?;
        assert_eq!(tag1, tag2);
        Ok(())
    }

    #[test]
    fn different_key_different_tag() -> std::result::Result<(), MnemonicError> {
        let tag_a = hmac_sha512(b"key a", b"same data")?;
        let tag_b = hmac_sha512(b"key b", b"same data")?;
        assert_ne!(tag_a, tag_b);
        Ok(())
    }

    /// RFC 4231 Test Case 2: HMAC-SHA-512.
    #[test]
    fn rfc4231_test_case_2() -> std::result::Result<(), MnemonicError> {
        let tag = hmac_sha512(b"Jefe", b"what do ya want for nothing?")?;
        let expected = "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea250554\
                        9758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737";
        assert_eq!(hex::encode(tag), expected);
        Ok(())
    }

    #[test]
    fn empty_key_accepted() -> std::result::Result<(), MnemonicError> {
        let tag = hmac_sha512(b"", b"data")?;
        assert_ne!(tag, [0u8; HMAC_SHA512_LEN]);
        Ok(())
    }
}
