//! Place-name recognition over tokenized text.
//!
//! The gazetteer is a flat lookup of known place names, seeded with a
//! built-in list for the region the catalog serves and extended with
//! whatever cities appear in the loaded catalog. Matching is done over
//! lowercased surface tokens with a longest-match-first sliding window, so
//! "Banja Luka" is recognized as one place and not two.

use ahash::AHashSet;

use crate::analysis::Token;

/// Built-in place names, including ASCII spellings of diacritic forms.
const BUILTIN_PLACES: &[&str] = &[
    "sarajevo",
    "east sarajevo",
    "istočno sarajevo",
    "istocno sarajevo",
    "banja luka",
    "mostar",
    "tuzla",
    "zenica",
    "bihać",
    "bihac",
    "brčko",
    "brcko",
    "bijeljina",
    "prijedor",
    "trebinje",
    "doboj",
    "cazin",
    "travnik",
    "visoko",
    "goražde",
    "gorazde",
    "konjic",
    "livno",
    "srebrenica",
    "zvornik",
    "gradačac",
    "gradacac",
    "bugojno",
    "jajce",
    "neum",
    "pale",
    "foča",
    "foca",
    "čapljina",
    "capljina",
    "ljubuški",
    "ljubuski",
    "široki brijeg",
    "siroki brijeg",
    "kiseljak",
    "vitez",
    "kakanj",
    "maglaj",
    "tešanj",
    "tesanj",
    "gračanica",
    "gracanica",
    "lukavac",
    "živinice",
    "zivinice",
    "jablanica",
    "stolac",
    "višegrad",
    "visegrad",
    "sanski most",
    "velika kladuša",
    "velika kladusa",
    "mrkonjić grad",
    "mrkonjic grad",
];

/// Recognizes place names in a token stream.
#[derive(Debug, Clone)]
pub struct Gazetteer {
    places: AHashSet<String>,
    max_words: usize,
}

impl Gazetteer {
    /// Gazetteer seeded with the built-in place list.
    pub fn new() -> Gazetteer {
        let mut gazetteer = Gazetteer::empty();
        for place in BUILTIN_PLACES {
            gazetteer.add_place(place);
        }
        gazetteer
    }

    /// Gazetteer with no entries.
    pub fn empty() -> Gazetteer {
        Gazetteer {
            places: AHashSet::new(),
            max_words: 0,
        }
    }

    /// Add places from an iterator, builder style.
    pub fn with_places<I, S>(mut self, places: I) -> Gazetteer
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for place in places {
            self.add_place(place.as_ref());
        }
        self
    }

    /// Register a single place name. Stored lowercased with
    /// single-space-separated words.
    pub fn add_place(&mut self, place: &str) {
        let normalized = place
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ");
        if normalized.is_empty() {
            return;
        }
        let words = normalized.split(' ').count();
        self.max_words = self.max_words.max(words);
        self.places.insert(normalized);
    }

    pub fn contains(&self, place: &str) -> bool {
        self.places.contains(&place.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Scan lowercased surface tokens for place names.
    ///
    /// Longer phrases win over their prefixes, and each recognized place is
    /// reported once, in order of first appearance.
    pub fn scan(&self, tokens: &[Token]) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            let mut advanced = false;
            let longest = self.max_words.min(tokens.len() - i);
            for len in (1..=longest).rev() {
                let candidate = tokens[i..i + len]
                    .iter()
                    .map(|t| t.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                if self.places.contains(&candidate) {
                    if !found.contains(&candidate) {
                        found.push(candidate);
                    }
                    i += len;
                    advanced = true;
                    break;
                }
            }
            if !advanced {
                i += 1;
            }
        }
        found
    }
}

impl Default for Gazetteer {
    fn default() -> Gazetteer {
        Gazetteer::new()
    }
}
