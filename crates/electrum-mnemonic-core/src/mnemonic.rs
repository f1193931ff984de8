//! Mnemonic phrases and their generation.
//!
//! Generation is rejection sampling:
//!
//! 1. Draw `ceil(word_count * bit_len / 8)` random bytes.
//! 2. Clear everything above `strength` bits.
//! 3. Encode the bytes as words.
//! 4. Accept the phrase if its seed-version fingerprint starts with the
//!    requested prefix, else draw again.
//!
//! A prefix of `n` hex digits matches with probability `16^-n`, so the
//! default segwit prefix `"100"` needs about 4096 candidates on average.
//! The async form yields to the executor every
//! [`GenerateOptions::yield_interval`] candidates so a long search does
//! not starve other tasks on the same worker.

use electrum_mnemonic_types::config::GenerateOptions;
use electrum_mnemonic_types::{MnemonicError, Result, SeedVersion};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::{debug, trace, warn};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::encoding::{decode, encode, mask_bytes};
use crate::prefix::{matches_any_prefix, seed_version};
use crate::wordlist::WordList;

// ---------------------------------------------------------------------------
// Mnemonic
// ---------------------------------------------------------------------------

/// A mnemonic phrase: space-separated words from one word list.
///
/// The inner string is zeroized on drop. `Mnemonic` does not implement
/// `Debug`, `Display`, `Clone` or `PartialEq`; compare or copy through
/// [`as_str`](Self::as_str) deliberately.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Mnemonic(String);

impl Mnemonic {
    /// Wraps an existing phrase after checking that every word belongs
    /// to `wordlist`.
    ///
    /// The phrase is taken verbatim: it is not normalized and its seed
    /// version is not checked.
    ///
    /// # Errors
    ///
    /// Returns [`MnemonicError::UnknownWord`] for the first word not in
    /// `wordlist`.
    pub fn from_phrase(phrase: &str, wordlist: &WordList) -> Result<Self> {
        let mut entropy = decode(phrase, wordlist)?;
        entropy.zeroize();
        Ok(Self(phrase.to_owned()))
    }

    /// Returns the mnemonic phrase as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the individual words.
    pub fn words(&self) -> Vec<&str> {
        self.0.split_whitespace().collect()
    }

    /// Returns the number of words in the mnemonic.
    pub fn word_count(&self) -> usize {
        self.0.split_whitespace().count()
    }

    /// Detects the named seed version this phrase carries, if any.
    pub fn seed_version(&self) -> Result<Option<SeedVersion>> {
        seed_version(&self.0)
    }
}

impl AsRef<str> for Mnemonic {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

// ---------------------------------------------------------------------------
// Candidates
// ---------------------------------------------------------------------------

/// Endless stream of random candidate phrases.
///
/// Each item encodes freshly drawn bytes masked to `strength` bits. For
/// word lists whose length is not a power of two an item may be
/// [`MnemonicError::WordIndexOutOfRange`]; callers treat that as a
/// rejected candidate.
pub struct Candidates<'a, R: RngCore + ?Sized> {
    wordlist: &'a WordList,
    rng: &'a mut R,
    strength: usize,
    byte_count: usize,
}

impl<'a, R: RngCore + ?Sized> Candidates<'a, R> {
    pub fn new(wordlist: &'a WordList, rng: &'a mut R, strength: usize) -> Self {
        let word_bits = wordlist.bit_len();
        let word_count = strength.div_ceil(word_bits);
        let byte_count = (word_count * word_bits).div_ceil(8);
        Self {
            wordlist,
            rng,
            strength,
            byte_count,
        }
    }

    /// Random bytes drawn per candidate.
    pub fn byte_count(&self) -> usize {
        self.byte_count
    }

    /// Draws and encodes one candidate.
    ///
    /// # Errors
    ///
    /// - [`MnemonicError::CryptoError`] if the random source fails.
    /// - [`MnemonicError::WordIndexOutOfRange`] if the draw addresses
    ///   past the end of the word list.
    pub fn draw(&mut self) -> Result<Mnemonic> {
        let mut bytes = vec![0u8; self.byte_count];
        if let Err(e) = self.rng.try_fill_bytes(&mut bytes) {
            return Err(MnemonicError::CryptoError {
                reason: format!("random source failed: {e}"),
            });
        }
        mask_bytes(&mut bytes, self.strength);
        let candidate = encode(&bytes, self.wordlist).map(Mnemonic);
        bytes.zeroize();
        candidate
    }
}

/// Never returns `None`.
impl<R: RngCore + ?Sized> Iterator for Candidates<'_, R> {
    type Item = Result<Mnemonic>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.draw())
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Rejection-sampling state shared by the sync and async generators.
struct Search<'a, R: RngCore + ?Sized> {
    candidates: Candidates<'a, R>,
    prefix: &'a str,
    max_attempts: Option<u64>,
    attempts: u64,
}

impl<'a, R: RngCore + ?Sized> Search<'a, R> {
    fn new(opts: &'a GenerateOptions, wordlist: &'a WordList, rng: &'a mut R) -> Self {
        Self {
            candidates: Candidates::new(wordlist, rng, opts.strength),
            prefix: &opts.prefix,
            max_attempts: opts.max_attempts,
            attempts: 0,
        }
    }

    /// Tries one candidate. `Ok(None)` means rejected.
    fn step(&mut self) -> Result<Option<Mnemonic>> {
        let candidate = self.candidates.draw();
        self.attempts += 1;

        let candidate = match candidate {
            Ok(mnemonic) => mnemonic,
            Err(MnemonicError::WordIndexOutOfRange { .. }) => return self.reject(),
            Err(e) => return Err(e),
        };

        if matches_any_prefix(candidate.as_str(), &[self.prefix])? {
            debug!(
                attempts = self.attempts,
                words = candidate.word_count(),
                prefix = self.prefix,
                "mnemonic generated"
            );
            return Ok(Some(candidate));
        }

        self.reject()
    }

    fn reject(&self) -> Result<Option<Mnemonic>> {
        match self.max_attempts {
            Some(max) if self.attempts >= max => {
                warn!(
                    attempts = self.attempts,
                    prefix = self.prefix,
                    "mnemonic generation hit attempt cap"
                );
                Err(MnemonicError::GenerationExhausted {
                    attempts: self.attempts,
                })
            }
            _ => Ok(None),
        }
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Generates a new phrase from the English list and the OS CSPRNG.
///
/// # Errors
///
/// See [`generate_mnemonic_with`].
pub fn generate_mnemonic(opts: &GenerateOptions) -> Result<Mnemonic> {
    generate_mnemonic_with(opts, WordList::english(), &mut OsRng)
}

/// Generates a new phrase with an injected word list and random source.
///
/// Blocks until a candidate carries `opts.prefix`. Call it from a
/// blocking context, or use [`generate_mnemonic_async_with`] inside a
/// runtime.
///
/// # Errors
///
/// - Any error of [`GenerateOptions::validate`], before drawing.
/// - [`MnemonicError::GenerationExhausted`] if `opts.max_attempts` is
///   reached.
/// - [`MnemonicError::CryptoError`] if the random source or HMAC fails.
pub fn generate_mnemonic_with<R>(
    opts: &GenerateOptions,
    wordlist: &WordList,
    rng: &mut R,
) -> Result<Mnemonic>
where
    R: RngCore + ?Sized,
{
    opts.validate()?;

    let mut search = Search::new(opts, wordlist, rng);
    loop {
        if let Some(mnemonic) = search.step()? {
            return Ok(mnemonic);
        }
    }
}

/// Async form of [`generate_mnemonic`].
pub async fn generate_mnemonic_async(opts: &GenerateOptions) -> Result<Mnemonic> {
    let mut rng = OsRng;
    generate_mnemonic_async_with(opts, WordList::english(), &mut rng).await
}

/// Async form of [`generate_mnemonic_with`].
///
/// Runs the search on the calling task and yields with
/// [`tokio::task::yield_now`] every `opts.yield_interval` candidates.
/// Produces exactly the same phrase as the sync form for the same random
/// stream.
pub async fn generate_mnemonic_async_with<R>(
    opts: &GenerateOptions,
    wordlist: &WordList,
    rng: &mut R,
) -> Result<Mnemonic>
where
    R: RngCore + ?Sized,
{
    opts.validate()?;

    let interval = opts.yield_interval as u64;
    let mut search = Search::new(opts, wordlist, rng);
    loop {
        if let Some(mnemonic) = search.step()? {
            return Ok(mnemonic);
        }
        if search.attempts % interval == 0 {
            trace!(attempts = search.attempts, "yielding mnemonic search");
            tokio::task::yield_now().await;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefix::prefix_matches;

    /// Deterministic source: every draw is zeroes followed by a big-endian
    /// counter in the last bytes.
    struct CounterRng(u64);

    impl RngCore for CounterRng {
        fn next_u32(&mut self) -> u32 {
            self.next_u64() as u32
        }

        fn next_u64(&mut self) -> u64 {
            let value = self.0;
            self.0 += 1;
            value
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
            let counter = self.next_u64().to_be_bytes();
            let n = dest.len().min(8);
            let start = dest.len() - n;
            dest[start..].copy_from_slice(&counter[8 - n..]);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    struct FailingRng;

    impl RngCore for FailingRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            Err(rand::Error::new("entropy unavailable"))
        }
    }

    #[test]
    fn default_generation_has_12_words_and_prefix() -> std::result::Result<(), MnemonicError> {
        let mnemonic = generate_mnemonic(&GenerateOptions::default())?;
        assert_eq!(mnemonic.word_count(), 12);
        assert_eq!(prefix_matches(mnemonic.as_str(), &["100"])?, vec![true]);
        Ok(())
    }

    #[test]
    fn generated_words_are_in_list() -> std::result::Result<(), MnemonicError> {
        let opts = GenerateOptions::for_version(SeedVersion::Standard);
        let mnemonic = generate_mnemonic(&opts)?;
        for word in mnemonic.words() {
            assert!(WordList::english().contains(word), "{word} not in list");
        }
        Ok(())
    }

    #[test]
    fn strength_rounds_up_to_whole_words() -> std::result::Result<(), MnemonicError> {
        let opts = GenerateOptions {
            prefix: "01".into(),
            strength: 133,
            ..GenerateOptions::default()
        };
        assert_eq!(generate_mnemonic(&opts)?.word_count(), 13);
        Ok(())
    }

    #[test]
    fn candidate_byte_count() {
        let mut rng = CounterRng(0);
        assert_eq!(Candidates::new(WordList::english(), &mut rng, 132).byte_count(), 17);
        let mut rng = CounterRng(0);
        assert_eq!(Candidates::new(WordList::english(), &mut rng, 133).byte_count(), 18);
    }

    #[test]
    fn candidates_are_masked() -> std::result::Result<(), MnemonicError> {
        let mut rng = CounterRng(0);
        let mut candidates = Candidates::new(WordList::english(), &mut rng, 132);
        let first = candidates
            .next()
            .ok_or(MnemonicError::GenerationExhausted { attempts: 0 })??;
        assert_eq!(first.as_str(), vec!["abandon"; 12].join(" "));
        Ok(())
    }

    #[test]
    fn draw_advances_the_random_source() -> std::result::Result<(), MnemonicError> {
        let mut rng = CounterRng(0);
        let mut candidates = Candidates::new(WordList::english(), &mut rng, 132);
        assert_eq!(candidates.draw()?.as_str(), vec!["abandon"; 12].join(" "));
        let second = candidates.draw()?;
        assert_eq!(second.as_str(), format!("{} ability", vec!["abandon"; 11].join(" ")));
        assert!(candidates.next().is_some());
        assert_eq!(rng.0, 3);
        Ok(())
    }

    #[test]
    fn draw_reports_random_source_failure() {
        let mut rng = FailingRng;
        let mut candidates = Candidates::new(WordList::english(), &mut rng, 132);
        assert!(matches!(
            candidates.draw(),
            Err(MnemonicError::CryptoError { .. })
        ));
    }

    #[test]
    fn deterministic_with_counter_rng() -> std::result::Result<(), MnemonicError> {
        let opts = GenerateOptions::for_version(SeedVersion::Standard);
        let mut rng = CounterRng(0);
        let mnemonic = generate_mnemonic_with(&opts, WordList::english(), &mut rng)?;
        let expected = format!("{} around", vec!["abandon"; 11].join(" "));
        assert_eq!(mnemonic.as_str(), expected);
        // Counter values 0..=97 were drawn.
        assert_eq!(rng.0, 98);
        Ok(())
    }

    #[test]
    fn attempt_cap_exhausts() {
        let opts = GenerateOptions {
            max_attempts: Some(5),
            ..GenerateOptions::default()
        };
        let mut rng = CounterRng(0);
        let result = generate_mnemonic_with(&opts, WordList::english(), &mut rng);
        assert!(matches!(
            result,
            Err(MnemonicError::GenerationExhausted { attempts: 5 })
        ));
        assert_eq!(rng.0, 5);
    }

    #[test]
    fn invalid_options_fail_before_drawing() {
        let opts = GenerateOptions {
            strength: 23,
            ..GenerateOptions::default()
        };
        let mut rng = CounterRng(0);
        let result = generate_mnemonic_with(&opts, WordList::english(), &mut rng);
        assert!(matches!(result, Err(MnemonicError::StrengthTooLow { .. })));
        assert_eq!(rng.0, 0);
    }

    #[tokio::test]
    async fn oversized_strength_fails_before_drawing() {
        let opts = GenerateOptions {
            strength: usize::MAX,
            ..GenerateOptions::default()
        };
        let mut rng = CounterRng(0);
        let sync = generate_mnemonic_with(&opts, WordList::english(), &mut rng);
        assert!(matches!(sync, Err(MnemonicError::ConfigError { .. })));
        let async_ = generate_mnemonic_async_with(&opts, WordList::english(), &mut rng).await;
        assert!(matches!(async_, Err(MnemonicError::ConfigError { .. })));
        assert_eq!(rng.0, 0);
    }

    #[test]
    fn rng_failure_propagates() {
        let result =
            generate_mnemonic_with(&GenerateOptions::default(), WordList::english(), &mut FailingRng);
        assert!(matches!(result, Err(MnemonicError::CryptoError { .. })));
    }

    #[test]
    fn non_power_of_two_list_skips_out_of_range() -> std::result::Result<(), MnemonicError> {
        let words: Vec<String> = (0..5).map(|i| format!("w{i}")).collect();
        let list = WordList::new(words)?;
        let opts = GenerateOptions {
            prefix: "0".into(),
            strength: 24,
            ..GenerateOptions::default()
        };
        let mnemonic = generate_mnemonic_with(&opts, &list, &mut OsRng)?;
        assert_eq!(mnemonic.word_count(), 8);
        for word in mnemonic.words() {
            assert!(list.contains(word));
        }
        Ok(())
    }

    #[test]
    fn from_phrase_checks_words() -> std::result::Result<(), MnemonicError> {
        let mnemonic = Mnemonic::from_phrase("abandon ability able", WordList::english())?;
        assert_eq!(mnemonic.word_count(), 3);
        assert!(Mnemonic::from_phrase("abandon aaaaa", WordList::english()).is_err());
        assert!(matches!(
            Mnemonic::from_phrase("", WordList::english()),
            Err(MnemonicError::UnknownWord { .. })
        ));
        Ok(())
    }

    // Inherent consts win over the trait defaults only when the bound holds.
    struct CloneCheck<T: ?Sized>(std::marker::PhantomData<T>);
    struct EqCheck<T: ?Sized>(std::marker::PhantomData<T>);

    trait NotClone {
        const CLONE: bool = false;
    }
    trait NotEq {
        const EQ: bool = false;
    }

    impl<T: ?Sized> NotClone for CloneCheck<T> {}
    impl<T: ?Sized> NotEq for EqCheck<T> {}

    #[allow(dead_code)]
    impl<T: ?Sized + Clone> CloneCheck<T> {
        const CLONE: bool = true;
    }
    #[allow(dead_code)]
    impl<T: ?Sized + PartialEq> EqCheck<T> {
        const EQ: bool = true;
    }

    #[test]
    fn mnemonic_cannot_be_copied_or_compared() {
        assert!(CloneCheck::<String>::CLONE);
        assert!(EqCheck::<String>::EQ);
        assert!(!CloneCheck::<Mnemonic>::CLONE);
        assert!(!EqCheck::<Mnemonic>::EQ);
    }

    #[tokio::test]
    async fn async_matches_sync_for_same_stream() -> std::result::Result<(), MnemonicError> {
        let opts = GenerateOptions {
            yield_interval: 7,
            ..GenerateOptions::for_version(SeedVersion::Standard)
        };
        let mut sync_rng = CounterRng(0);
        let mut async_rng = CounterRng(0);
        let sync = generate_mnemonic_with(&opts, WordList::english(), &mut sync_rng)?;
        let async_ = generate_mnemonic_async_with(&opts, WordList::english(), &mut async_rng).await?;
        assert_eq!(sync.as_str(), async_.as_str());
        assert_eq!(sync_rng.0, async_rng.0);
        Ok(())
    }

    #[tokio::test]
    async fn async_default_generation() -> std::result::Result<(), MnemonicError> {
        let mnemonic = generate_mnemonic_async(&GenerateOptions::default()).await?;
        assert_eq!(mnemonic.seed_version()?, Some(SeedVersion::Segwit));
        Ok(())
    }
}
