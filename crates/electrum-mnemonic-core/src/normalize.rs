//! Phrase and passphrase normalization.
//!
//! Every phrase is normalized before it is fingerprinted or fed to the
//! KDF, so two spellings of the same words (composed vs. decomposed
//! accents, fullwidth Latin, ideographic spaces) produce the same seed.
//!
//! The pipeline is fixed:
//!
//! 1. Unicode NFKD.
//! 2. Full Unicode lowercase.
//! 3. Remove every codepoint in [`COMBINING_RANGES`].
//! 4. Remove whitespace whose two neighbours are both CJK.
//!
//! Step 4 looks at neighbours in the string produced by step 3, so a run
//! of two spaces between CJK glyphs is preserved.

use unicode_normalization::UnicodeNormalization;

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// Unicode blocks treated as CJK, sorted by start codepoint.
///
/// Hangul Jamo, Kana, Bopomofo, Yi, Lisu and Miao are included, as are
/// the fullwidth forms and the ideographic variation selectors.
pub const CJK_RANGES: &[(u32, u32)] = &[
    (0x1100, 0x11ff),   // Hangul Jamo
    (0x2e80, 0x2eff),   // CJK Radicals Supplement
    (0x2f00, 0x2fdf),   // CJK Radicals
    (0x2ff0, 0x2fff),   // Ideographic Description Characters
    (0x3040, 0x309f),   // Hiragana
    (0x30a0, 0x30ff),   // Katakana
    (0x3100, 0x312f),   // Bopomofo
    (0x3130, 0x318f),   // Hangul Compatibility Jamo
    (0x3190, 0x319f),   // Kanbun
    (0x31a0, 0x31bf),   // Bopomofo Extended
    (0x31c0, 0x31ef),   // CJK Strokes
    (0x31f0, 0x31ff),   // Katakana Phonetic Extensions
    (0x3400, 0x4dbf),   // CJK Unified Ideographs Extension A
    (0x4e00, 0x9fff),   // CJK Unified Ideographs
    (0xa000, 0xa48f),   // Yi Syllables
    (0xa490, 0xa4cf),   // Yi Radicals
    (0xa4d0, 0xa4ff),   // Lisu
    (0xa960, 0xa97f),   // Hangul Jamo Extended A
    (0xac00, 0xd7af),   // Hangul Syllables
    (0xd7b0, 0xd7ff),   // Hangul Jamo Extended B
    (0xf900, 0xfaff),   // CJK Compatibility Ideographs
    (0xff00, 0xffef),   // Halfwidth and Fullwidth Forms
    (0x16f00, 0x16f9f), // Miao
    (0x1b000, 0x1b0ff), // Kana Supplement
    (0x20000, 0x2a6df), // CJK Unified Ideographs Extension B
    (0x2a700, 0x2b73f), // CJK Unified Ideographs Extension C
    (0x2b740, 0x2b81f), // CJK Unified Ideographs Extension D
    (0x2f800, 0x2fa1d), // CJK Compatibility Ideographs Supplement
    (0xe0100, 0xe01ef), // Variation Selectors Supplement
];

/// Combining marks removed in step 3, as inclusive sorted ranges.
///
/// Covers the Latin diacritics, Hebrew and Arabic points, the Indic
/// vowel signs, the kana voiced sound marks (U+3099, U+309A) and the
/// musical and Glagolitic combining marks. The set is frozen: changing it
/// changes the seed of every phrase that contains an affected character.
#[rustfmt::skip]
pub const COMBINING_RANGES: &[(u32, u32)] = &[
    (0x0300, 0x034e), (0x0350, 0x036f), (0x0483, 0x0487), (0x0591, 0x05bd),
    (0x05bf, 0x05bf), (0x05c1, 0x05c2), (0x05c4, 0x05c5), (0x05c7, 0x05c7),
    (0x0610, 0x061a), (0x064b, 0x065f), (0x0670, 0x0670), (0x06d6, 0x06dc),
    (0x06df, 0x06e4), (0x06e7, 0x06e8), (0x06ea, 0x06ed), (0x0711, 0x0711),
    (0x0730, 0x074a), (0x07eb, 0x07f3), (0x0816, 0x0819), (0x081b, 0x0823),
    (0x0825, 0x0827), (0x0829, 0x082d), (0x0859, 0x085b), (0x08d4, 0x08e1),
    (0x08e3, 0x08ff), (0x093c, 0x093c), (0x094d, 0x094d), (0x0951, 0x0954),
    (0x09bc, 0x09bc), (0x09cd, 0x09cd), (0x0a3c, 0x0a3c), (0x0a4d, 0x0a4d),
    (0x0abc, 0x0abc), (0x0acd, 0x0acd), (0x0b3c, 0x0b3c), (0x0b4d, 0x0b4d),
    (0x0bcd, 0x0bcd), (0x0c4d, 0x0c4d), (0x0c55, 0x0c56), (0x0cbc, 0x0cbc),
    (0x0ccd, 0x0ccd), (0x0d4d, 0x0d4d), (0x0dca, 0x0dca), (0x0e38, 0x0e3a),
    (0x0e48, 0x0e4b), (0x0eb8, 0x0eb9), (0x0ec8, 0x0ecb), (0x0f18, 0x0f19),
    (0x0f35, 0x0f35), (0x0f37, 0x0f37), (0x0f39, 0x0f39), (0x0f71, 0x0f72),
    (0x0f74, 0x0f74), (0x0f7a, 0x0f7d), (0x0f80, 0x0f80), (0x0f82, 0x0f84),
    (0x0f86, 0x0f87), (0x0fc6, 0x0fc6), (0x1037, 0x1037), (0x1039, 0x103a),
    (0x108d, 0x108d), (0x135d, 0x135f), (0x1714, 0x1714), (0x1734, 0x1734),
    (0x17d2, 0x17d2), (0x17dd, 0x17dd), (0x18a9, 0x18a9), (0x1939, 0x193b),
    (0x1a17, 0x1a18), (0x1a60, 0x1a60), (0x1a75, 0x1a7c), (0x1a7f, 0x1a7f),
    (0x1ab0, 0x1abd), (0x1b34, 0x1b34), (0x1b44, 0x1b44), (0x1b6b, 0x1b73),
    (0x1baa, 0x1bab), (0x1be6, 0x1be6), (0x1bf2, 0x1bf3), (0x1c37, 0x1c37),
    (0x1cd0, 0x1cd2), (0x1cd4, 0x1ce0), (0x1ce2, 0x1ce8), (0x1ced, 0x1ced),
    (0x1cf4, 0x1cf4), (0x1cf8, 0x1cf9), (0x1dc0, 0x1df5), (0x1dfb, 0x1dff),
    (0x20d0, 0x20dc), (0x20e1, 0x20e1), (0x20e5, 0x20f0), (0x2cef, 0x2cf1),
    (0x2d7f, 0x2d7f), (0x2de0, 0x2dff), (0x302a, 0x302f), (0x3099, 0x309a),
    (0xa66f, 0xa66f), (0xa674, 0xa67d), (0xa69e, 0xa69f), (0xa6f0, 0xa6f1),
    (0xa806, 0xa806), (0xa8c4, 0xa8c4), (0xa8e0, 0xa8f1), (0xa92b, 0xa92d),
    (0xa953, 0xa953), (0xa9b3, 0xa9b3), (0xa9c0, 0xa9c0), (0xaab0, 0xaab0),
    (0xaab2, 0xaab4), (0xaab7, 0xaab8), (0xaabe, 0xaabf), (0xaac1, 0xaac1),
    (0xaaf6, 0xaaf6), (0xabed, 0xabed), (0xfb1e, 0xfb1e), (0xfe20, 0xfe2f),
    (0x101fd, 0x101fd), (0x102e0, 0x102e0), (0x10376, 0x1037a), (0x10a0d, 0x10a0d),
    (0x10a0f, 0x10a0f), (0x10a38, 0x10a3a), (0x10a3f, 0x10a3f), (0x10ae5, 0x10ae6),
    (0x11046, 0x11046), (0x1107f, 0x1107f), (0x110b9, 0x110ba), (0x11100, 0x11102),
    (0x11133, 0x11134), (0x11173, 0x11173), (0x111c0, 0x111c0), (0x111ca, 0x111ca),
    (0x11235, 0x11236), (0x112e9, 0x112ea), (0x1133c, 0x1133c), (0x1134d, 0x1134d),
    (0x11366, 0x1136c), (0x11370, 0x11374), (0x11442, 0x11442), (0x11446, 0x11446),
    (0x114c2, 0x114c3), (0x115bf, 0x115c0), (0x1163f, 0x1163f), (0x116b6, 0x116b7),
    (0x1172b, 0x1172b), (0x11c3f, 0x11c3f), (0x16af0, 0x16af4), (0x16b30, 0x16b36),
    (0x1bc9e, 0x1bc9e), (0x1d165, 0x1d169), (0x1d16d, 0x1d172), (0x1d17b, 0x1d182),
    (0x1d185, 0x1d18b), (0x1d1aa, 0x1d1ad), (0x1d242, 0x1d244), (0x1e000, 0x1e006),
    (0x1e008, 0x1e018), (0x1e01b, 0x1e021), (0x1e023, 0x1e024), (0x1e026, 0x1e02a),
    (0x1e8d0, 0x1e8d6), (0x1e944, 0x1e94a),
];

fn in_ranges(ranges: &[(u32, u32)], c: char) -> bool {
    let cp = u32::from(c);
    ranges
        .binary_search_by(|&(lo, hi)| {
            if hi < cp {
                std::cmp::Ordering::Less
            } else if lo > cp {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Equal
            }
        })
        .is_ok()
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Returns `true` if `c` lies in one of the [`CJK_RANGES`] blocks.
pub fn is_cjk(c: char) -> bool {
    in_ranges(CJK_RANGES, c)
}

/// Returns `true` if `c` is one of the combining marks stripped during
/// normalization.
pub fn is_combining(c: char) -> bool {
    in_ranges(COMBINING_RANGES, c)
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Normalizes a phrase or passphrase.
///
/// Idempotent: `normalize_text(&normalize_text(s)) == normalize_text(s)`.
pub fn normalize_text(text: &str) -> String {
    let lowered = text.nfkd().collect::<String>().to_lowercase();
    let stripped: Vec<char> = lowered.chars().filter(|&c| !is_combining(c)).collect();
    remove_cjk_spaces(&stripped)
}

fn remove_cjk_spaces(chars: &[char]) -> String {
    chars
        .iter()
        .enumerate()
        .filter(|&(i, &c)| {
            let between_cjk = c.is_whitespace()
                && i > 0
                && is_cjk(chars[i - 1])
                && chars.get(i + 1).is_some_and(|&next| is_cjk(next));
            !between_cjk
        })
        .map(|(_, &c)| c)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
