//! Electrum-style mnemonic phrases.
//!
//! Entropy is encoded as words from a fixed list, phrases are tagged with
//! a seed version through an HMAC fingerprint, and a 64-byte seed is
//! stretched from the phrase with PBKDF2.
//!
//! # Modules
//!
//! - [`wordlist`]: word lists and the bundled English list
//! - [`encoding`]: bytes to words and back
//! - [`normalize`]: Unicode normalization of phrases and passphrases
//! - [`mac`]: HMAC-SHA512
//! - [`prefix`]: seed-version fingerprints and prefix matching
//! - [`mnemonic`]: phrase generation by rejection sampling
//! - [`seed`]: seed derivation and validation
//!
//! # Example
//!
//! ```no_run
//! use electrum_mnemonic_core::{generate_mnemonic, mnemonic_to_seed};
//! use electrum_mnemonic_types::config::{GenerateOptions, SeedOptions};
//!
//! # fn main() -> electrum_mnemonic_types::Result<()> {
//! let mnemonic = generate_mnemonic(&GenerateOptions::default())?;
//! let seed = mnemonic_to_seed(mnemonic.as_str(), &SeedOptions::default())?;
//! assert_eq!(seed.as_bytes().len(), 64);
//! # Ok(())
//! # }
//! ```

pub mod encoding;
pub mod mac;
pub mod mnemonic;
pub mod normalize;
pub mod prefix;
pub mod seed;
pub mod wordlist;

pub use encoding::{bitlen, decode, encode, mask_bytes};
pub use mnemonic::{
    generate_mnemonic, generate_mnemonic_async, generate_mnemonic_async_with,
    generate_mnemonic_with, Candidates, Mnemonic,
};
pub use normalize::{is_cjk, normalize_text};
pub use prefix::{
    check_prefix, matches_any_prefix, prefix_matches, seed_fingerprint, seed_version,
    validate_prefix_format,
};
pub use seed::{mnemonic_to_seed, mnemonic_to_seed_async, validate_mnemonic, Seed};
pub use wordlist::WordList;
