//! Catalog-derived vocabulary for intent classification.
//!
//! Every distinct value of the catalog's `category`, `venue`, `city`,
//! `name` and `description` fields is tokenized into a lowercase phrase.
//! A message "hits" the vocabulary when any phrase appears verbatim in its
//! surface tokens. The vocabulary is built once per catalog load; the
//! catalog is immutable afterwards, so the vocabulary never refreshes.

use ahash::AHashSet;

use crate::analysis::Token;
use crate::catalog::Catalog;

/// Phrase lookup built from catalog field values.
#[derive(Debug, Clone, Default)]
pub struct CatalogVocabulary {
    phrases: AHashSet<String>,
    max_words: usize,
}

impl CatalogVocabulary {
    /// Empty vocabulary; nothing ever hits it.
    pub fn empty() -> CatalogVocabulary {
        CatalogVocabulary::default()
    }

    /// Build the vocabulary from every pattern-bearing field of the catalog.
    pub fn from_catalog(catalog: &Catalog) -> CatalogVocabulary {
        let mut vocabulary = CatalogVocabulary::empty();
        for event in catalog {
            vocabulary.add_value(&event.category);
            vocabulary.add_value(&event.venue);
            vocabulary.add_value(&event.city);
            vocabulary.add_value(&event.name);
            vocabulary.add_value(&event.description);
        }
        vocabulary
    }

    /// Register one field value. Comma-separated values ("rock, pop")
    /// contribute one phrase per part.
    pub fn add_value(&mut self, value: &str) {
        for part in value.split(',') {
            let words: Vec<String> = part
                .split_whitespace()
                .map(normalize_word)
                .filter(|w| !w.is_empty())
                .collect();
            if words.is_empty() {
                continue;
            }
            self.max_words = self.max_words.max(words.len());
            self.phrases.insert(words.join(" "));
        }
    }

    pub fn contains_phrase(&self, phrase: &str) -> bool {
        let normalized: Vec<String> = phrase
            .split_whitespace()
            .map(normalize_word)
            .filter(|w| !w.is_empty())
            .collect();
        self.phrases.contains(&normalized.join(" "))
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Whether any vocabulary phrase occurs in the given surface tokens.
    pub fn hit(&self, tokens: &[Token]) -> bool {
        if self.phrases.is_empty() {
            return false;
        }
        for i in 0..tokens.len() {
            let longest = self.max_words.min(tokens.len() - i);
            for len in 1..=longest {
                let candidate = tokens[i..i + len]
                    .iter()
                    .map(|t| t.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                if self.phrases.contains(&candidate) {
                    return true;
                }
            }
        }
        false
    }
}

/// Values are compared against tokenizer output, so punctuation glued to a
/// word has to go the same way the tokenizer would drop it.
fn normalize_word(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Filter, LowercaseFilter, Tokenizer, WordTokenizer};
    use crate::catalog::EventRecord;

    fn surface_tokens(text: &str) -> Vec<Token> {
        let tokens = WordTokenizer::new().tokenize(text).unwrap();
        LowercaseFilter::new().filter(tokens).unwrap().collect()
    }

    fn event(name: &str, venue: &str, category: &str) -> EventRecord {
        EventRecord {
            name: name.to_string(),
            description: "live music".to_string(),
            start_time: "2024-07-01 20:00:00".to_string(),
            end_time: "2024-07-01 23:00:00".to_string(),
            venue: venue.to_string(),
            city: "sarajevo".to_string(),
            category: category.to_string(),
            genre: "rock".to_string(),
            price: "20 BAM".to_string(),
        }
    }

    #[test]
    fn test_single_word_value_hits() {
        let catalog = Catalog::new(vec![event("Summer Jam", "Skenderija", "concert")]);
        let vocabulary = CatalogVocabulary::from_catalog(&catalog);

        assert!(vocabulary.hit(&surface_tokens("any concert tonight?")));
        assert!(!vocabulary.hit(&surface_tokens("any opera tonight?")));
    }

    #[test]
    fn test_multi_word_value_must_appear_whole() {
        let catalog = Catalog::new(vec![event("Summer Jam", "Dom Mladih", "concert")]);
        let vocabulary = CatalogVocabulary::from_catalog(&catalog);

        assert!(vocabulary.hit(&surface_tokens("is there anything at dom mladih")));
        assert!(vocabulary.contains_phrase("Dom Mladih"));
        assert!(!vocabulary.hit(&surface_tokens("is there anything at dom")));
    }

    #[test]
    fn test_name_and_city_are_in_the_vocabulary() {
        let catalog = Catalog::new(vec![event("Summer Jam", "Skenderija", "concert")]);
        let vocabulary = CatalogVocabulary::from_catalog(&catalog);

        assert!(vocabulary.hit(&surface_tokens("when is summer jam?")));
        assert!(vocabulary.hit(&surface_tokens("what about sarajevo")));
    }

    #[test]
    fn test_empty_vocabulary_never_hits() {
        let vocabulary = CatalogVocabulary::empty();
        assert!(!vocabulary.hit(&surface_tokens("concert in sarajevo")));
        assert!(vocabulary.is_empty());
    }
}
