//! Bit-level transcoding between byte buffers and word sequences.
//!
//! A buffer is read as a big-endian bit string (MSB of byte 0 first) and
//! cut into chunks of [`WordList::bit_len`] bits, each chunk selecting one
//! word. Encoding is lossy: only the low-order `word_count * bit_len`
//! bits survive. A 17-byte buffer and the 2048-word English list yield
//! 12 words and the top 4 bits are dropped.

use electrum_mnemonic_types::{MnemonicError, Result};

use crate::wordlist::WordList;

/// Returns `ceil(log2(n))`, the number of bits needed to index `n`
/// items. `bitlen(0)` and `bitlen(1)` are 0.
pub fn bitlen(n: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    (usize::BITS - (n - 1).leading_zeros()) as usize
}

/// Reads `width` bits of `data` starting at bit offset `start`.
fn read_bits(data: &[u8], start: usize, width: usize) -> usize {
    (start..start + width).fold(0usize, |acc, bit| {
        let value = (data[bit / 8] >> (7 - bit % 8)) & 1;
        (acc << 1) | usize::from(value)
    })
}

/// Encodes `data` as a space-joined phrase from `wordlist`.
///
/// The leading `8 * data.len() % bit_len` bits are discarded. A buffer
/// shorter than one word encodes to the empty string.
///
/// # Errors
///
/// Returns [`MnemonicError::WordIndexOutOfRange`] if a chunk addresses
/// past the end of a word list whose length is not a power of two.
pub fn encode(data: &[u8], wordlist: &WordList) -> Result<String> {
    let word_bits = wordlist.bit_len();
    let total_bits = data.len() * 8;
    let word_count = total_bits / word_bits;
    let skipped = total_bits - word_count * word_bits;

    let mut words = Vec::with_capacity(word_count);
    for i in 0..word_count {
        let index = read_bits(data, skipped + i * word_bits, word_bits);
        let word = wordlist
            .word(index)
            .ok_or(MnemonicError::WordIndexOutOfRange {
                index,
                len: wordlist.len(),
            })?;
        words.push(word);
    }

    Ok(words.join(" "))
}

/// Decodes a phrase back into bytes.
///
/// Words are split on single spaces. Their indices are concatenated and
/// left-padded with zero bits to a whole number of bytes.
///
/// # Errors
///
/// Returns [`MnemonicError::UnknownWord`] for the first word not present
/// in `wordlist`. The empty phrase splits into one empty word and fails
/// the same way.
pub fn decode(phrase: &str, wordlist: &WordList) -> Result<Vec<u8>> {
    let indices = phrase
        .split(' ')
        .map(|word| {
            wordlist
                .index_of(word)
                .ok_or_else(|| MnemonicError::UnknownWord {
                    word: word.to_owned(),
                    wordlist: wordlist.preview(),
                })
        })
        .collect::<Result<Vec<usize>>>()?;

    let word_bits = wordlist.bit_len();
    let total_bits = indices.len() * word_bits;
    let byte_len = total_bits.div_ceil(8);
    let padding = byte_len * 8 - total_bits;

    let mut out = vec![0u8; byte_len];
    for (i, &index) in indices.iter().enumerate() {
        for k in 0..word_bits {
            if (index >> (word_bits - 1 - k)) & 1 == 1 {
                let bit = padding + i * word_bits + k;
                out[bit / 8] |= 0x80 >> (bit % 8);
            }
        }
    }

    Ok(out)
}

/// Clears every bit of `buf` above the low-order `bits` bits.
///
/// Used to cap freshly drawn entropy at the requested strength.
pub fn mask_bytes(buf: &mut [u8], bits: usize) {
    let total_bits = buf.len() * 8;
    if bits >= total_bits {
        return;
    }

    let cleared = total_bits - bits;
    let full_bytes = cleared / 8;
    buf[..full_bytes].fill(0);

    let partial = cleared % 8;
    if partial > 0 {
        buf[full_bytes] &= 0xff >> partial;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
