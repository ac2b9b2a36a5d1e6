//! Stemming token filter and stemmer implementations.
//!
//! Stemming reduces inflected English words to a shared root ("concerts" and
//! "concert" both become `concert`), which is what lets query keywords line
//! up with catalog text and TF-IDF terms. The [`PorterStemmer`] implements
//! the classic five-step Porter algorithm.
//!
//! # Examples
//!
//! ```
//! use marquee::analysis::stem::{PorterStemmer, Stemmer};
//!
//! let stemmer = PorterStemmer::new();
//!
//! assert_eq!(stemmer.stem("running"), "run");
//! assert_eq!(stemmer.stem("exhibitions"), "exhibit");
//! assert_eq!(stemmer.stem("traditional"), "tradit");
//! ```

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Trait for stemming algorithms.
pub trait Stemmer: Send + Sync {
    /// Stem a word to its root form.
    fn stem(&self, word: &str) -> String;

    /// Get the name of this stemmer.
    fn name(&self) -> &'static str;
}

/// Porter stemming algorithm.
///
/// Operates on lowercase ASCII words; anything containing non-ASCII bytes is
/// returned lowercased but otherwise untouched, since the suffix rules only
/// make sense for English.
#[derive(Debug, Clone, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    /// Create a new Porter stemmer.
    pub fn new() -> Self {
        PorterStemmer
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        let word = word.to_lowercase();
        if word.len() <= 2 || !word.is_ascii() {
            return word;
        }

        let word = step1a(&word);
        let word = step1b(&word);
        let word = step2(&word);
        let word = step3(&word);
        let word = step4(&word);
        step5(&word)
    }

    fn name(&self) -> &'static str {
        "porter"
    }
}

/// `true` if the byte at `pos` acts as a vowel ('y' counts after a consonant).
fn is_vowel(word: &[u8], pos: usize) -> bool {
    match word[pos] {
        b'a' | b'e' | b'i' | b'o' | b'u' => true,
        b'y' => pos > 0 && !is_vowel(word, pos - 1),
        _ => false,
    }
}

/// The Porter measure: the number of vowel-consonant sequences in the word.
fn measure(word: &str) -> usize {
    let bytes = word.as_bytes();
    let n = bytes.len();
    let mut m = 0;
    let mut i = 0;

    while i < n && !is_vowel(bytes, i) {
        i += 1;
    }
    while i < n {
        while i < n && is_vowel(bytes, i) {
            i += 1;
        }
        if i >= n {
            break;
        }
        m += 1;
        while i < n && !is_vowel(bytes, i) {
            i += 1;
        }
    }

    m
}

fn contains_vowel(word: &str) -> bool {
    let bytes = word.as_bytes();
    (0..bytes.len()).any(|i| is_vowel(bytes, i))
}

fn ends_double_consonant(word: &str) -> bool {
    let bytes = word.as_bytes();
    let n = bytes.len();
    n >= 2 && bytes[n - 1] == bytes[n - 2] && !is_vowel(bytes, n - 1)
}

/// Consonant-vowel-consonant ending where the final consonant is not w, x or y.
fn ends_cvc(word: &str) -> bool {
    let bytes = word.as_bytes();
    let n = bytes.len();
    n >= 3
        && !is_vowel(bytes, n - 3)
        && is_vowel(bytes, n - 2)
        && !is_vowel(bytes, n - 1)
        && !matches!(bytes[n - 1], b'w' | b'x' | b'y')
}

fn strip<'a>(word: &'a str, suffix: &str) -> &'a str {
    &word[..word.len() - suffix.len()]
}

/// Plural removal: sses -> ss, ies -> i, trailing s dropped.
fn step1a(word: &str) -> String {
    if word.ends_with("sses") {
        format!("{}ss", strip(word, "sses"))
    } else if word.ends_with("ies") {
        format!("{}i", strip(word, "ies"))
    } else if word.ends_with("ss") {
        word.to_string()
    } else if word.ends_with('s') && word.len() > 1 {
        strip(word, "s").to_string()
    } else {
        word.to_string()
    }
}

/// Past-tense and progressive removal with cleanup of the exposed stem.
fn step1b(word: &str) -> String {
    let reduced = if word.ends_with("eed") {
        let stem = strip(word, "eed");
        if measure(stem) >= 1 {
            return format!("{stem}ee");
        }
        return word.to_string();
    } else if word.ends_with("ed") {
        let stem = strip(word, "ed");
        if contains_vowel(stem) { Some(stem) } else { None }
    } else if word.ends_with("ing") {
        let stem = strip(word, "ing");
        if contains_vowel(stem) { Some(stem) } else { None }
    } else {
        None
    };

    let Some(stem) = reduced else {
        return word.to_string();
    };

    if stem.ends_with("at") || stem.ends_with("bl") || stem.ends_with("iz") {
        format!("{stem}e")
    } else if ends_double_consonant(stem)
        && !stem.ends_with('l')
        && !stem.ends_with('s')
        && !stem.ends_with('z')
    {
        stem[..stem.len() - 1].to_string()
    } else if measure(stem) == 1 && ends_cvc(stem) {
        format!("{stem}e")
    } else {
        stem.to_string()
    }
}

const STEP2_RULES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("abli", "able"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
];

const STEP3_RULES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

/// Apply the first rule whose suffix matches, keeping the word unchanged when
/// the stem's measure is too small.
fn apply_rules(word: &str, rules: &[(&str, &str)]) -> String {
    for (old, new) in rules {
        if word.ends_with(old) {
            let stem = strip(word, old);
            if measure(stem) >= 1 {
                return format!("{stem}{new}");
            }
            return word.to_string();
        }
    }
    word.to_string()
}

fn step2(word: &str) -> String {
    apply_rules(word, STEP2_RULES)
}

fn step3(word: &str) -> String {
    apply_rules(word, STEP3_RULES)
}

const STEP4_SUFFIXES: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

/// Remove derivational suffixes from long stems. "ion" only comes off after
/// 's' or 't'.
fn step4(word: &str) -> String {
    for suffix in STEP4_SUFFIXES {
        if word.ends_with(suffix) {
            let stem = strip(word, suffix);
            if measure(stem) > 1 && (*suffix != "ion" || stem.ends_with('s') || stem.ends_with('t'))
            {
                return stem.to_string();
            }
        }
    }
    word.to_string()
}

/// Final cleanup: drop a silent 'e' and halve a trailing "ll".
fn step5(word: &str) -> String {
    let word = if word.ends_with('e') {
        let stem = strip(word, "e");
        let m = measure(stem);
        if m > 1 || (m == 1 && !ends_cvc(stem)) {
            stem.to_string()
        } else {
            word.to_string()
        }
    } else {
        word.to_string()
    };

    if word.ends_with("ll") && measure(&word) > 1 {
        word[..word.len() - 1].to_string()
    } else {
        word
    }
}

/// Filter that applies stemming to tokens.
pub struct StemFilter {
    /// The stemmer to use.
    stemmer: Box<dyn Stemmer>,
}

impl std::fmt::Debug for StemFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StemFilter")
            .field("stemmer", &self.stemmer.name())
            .finish()
    }
}

impl StemFilter {
    /// Create a new stem filter with the Porter stemmer.
    pub fn new() -> Self {
        StemFilter {
            stemmer: Box::new(PorterStemmer::new()),
        }
    }

    /// Create a stem filter with a custom stemmer.
    pub fn with_stemmer(stemmer: Box<dyn Stemmer>) -> Self {
        StemFilter { stemmer }
    }
}

impl Default for StemFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StemFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                if token.is_stopped() {
                    token
                } else {
                    let stemmed = self.stemmer.stem(&token.text);
                    token.with_text(stemmed)
                }
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "stem"
    }
}
