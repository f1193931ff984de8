//! Word lists used to encode entropy as words.
//!
//! A [`WordList`] is an ordered list of unique words plus a reverse
//! index for O(1) lookups. The bundled English list has 2048 entries,
//! so each word carries 11 bits.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use electrum_mnemonic_types::{MnemonicError, Result};

use crate::encoding::bitlen;

const ENGLISH_RAW: &str = include_str!("../wordlists/english.txt");

static ENGLISH: LazyLock<WordList> = LazyLock::new(|| {
    WordList::from_trusted(
        ENGLISH_RAW
            .lines()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_owned)
            .collect(),
    )
});

/// Maximum bits per word. Chunks are decoded into a `u32`.
pub const MAX_WORD_BITS: usize = 32;

/// Characters of the JSON rendering kept by [`WordList::preview`].
const PREVIEW_CHARS: usize = 50;

/// An immutable, ordered list of unique words.
#[derive(Clone)]
pub struct WordList {
    words: Vec<String>,
    index: HashMap<String, usize>,
    bit_len: usize,
}

impl WordList {
    /// Builds a word list from caller-supplied words.
    ///
    /// # Errors
    ///
    /// Returns [`MnemonicError::InvalidWordList`] if the list has fewer
    /// than two words, contains an empty word, a word with whitespace or
    /// a duplicate, or needs more than [`MAX_WORD_BITS`] bits per word.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();

        if words.len() < 2 {
            return Err(MnemonicError::InvalidWordList {
                reason: format!("need at least 2 words, got {}", words.len()),
            });
        }

        let bit_len = bitlen(words.len());
        if bit_len > MAX_WORD_BITS {
            return Err(MnemonicError::InvalidWordList {
                reason: format!("{} words need {bit_len} bits per word", words.len()),
            });
        }

        let mut index = HashMap::with_capacity(words.len());
        for (i, word) in words.iter().enumerate() {
            if word.is_empty() || word.chars().any(char::is_whitespace) {
                return Err(MnemonicError::InvalidWordList {
                    reason: format!("word {i} is empty or contains whitespace: {word:?}"),
                });
            }
            if index.insert(word.clone(), i).is_some() {
                return Err(MnemonicError::InvalidWordList {
                    reason: format!("duplicate word {word:?} at index {i}"),
                });
            }
        }

        Ok(Self {
            words,
            index,
            bit_len,
        })
    }

    /// Builds a list already known to be valid.
    fn from_trusted(words: Vec<String>) -> Self {
        let index = words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), i))
            .collect();
        let bit_len = bitlen(words.len());
        Self {
            words,
            index,
            bit_len,
        }
    }

    /// The bundled 2048-word English list.
    pub fn english() -> &'static WordList {
        &ENGLISH
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always `false`: a word list holds at least two words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Bits carried by one word, `ceil(log2(len))`.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Returns the word at `index`, if any.
    pub fn word(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    /// Returns the position of `word` in the list, if present.
    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Truncated pretty-printed JSON rendering of the list, used in
    /// [`MnemonicError::UnknownWord`] messages.
    pub fn preview(&self) -> String {
        let rendered = serde_json::to_string_pretty(&self.words).unwrap_or_default();
        let mut preview: String = rendered.chars().take(PREVIEW_CHARS).collect();
        preview.push_str("...");
        preview
    }
}

impl fmt::Debug for WordList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordList")
            .field("len", &self.words.len())
            .field("bit_len", &self.bit_len)
            .field("first", &self.words.first())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
