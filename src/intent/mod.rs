//! Intent classification.
//!
//! A message is assigned exactly one [`Intent`] by a fixed rule cascade:
//! greeting words first, then the bare catalog-wide "events" query, then the
//! broad listing request, then catalog-vocabulary phrases, then extractor
//! signals. Messages with no rule hit and no alphabetic content are
//! [`Intent::Unknown`]; everything else falls back to
//! [`Intent::GeneralInquiry`].
//!
//! With [`IntentGranularity::Coarse`] every criteria-bearing message maps to
//! [`Intent::SpecificInquiry`]; with [`IntentGranularity::Fine`] the
//! strongest extractor signal is surfaced instead, checked in the order
//! location, price, keyword.

pub mod vocabulary;

pub use vocabulary::CatalogVocabulary;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::analysis::{Analyzer, LowercaseFilter, PipelineAnalyzer, Token, WordTokenizer};
use crate::extract::ExtractedQuery;

/// Closed set of recognized message purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    /// Broad "show me events" request with no narrowing criteria.
    EventInquiry,
    LocationInquiry,
    PriceInquiry,
    CategoryKeywordInquiry,
    /// Criteria-bearing inquiry under coarse granularity.
    SpecificInquiry,
    /// Request for a representative sample.
    GeneralInquiry,
    Unknown,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::EventInquiry => "event_inquiry",
            Intent::LocationInquiry => "location_inquiry",
            Intent::PriceInquiry => "price_inquiry",
            Intent::CategoryKeywordInquiry => "category_keyword_inquiry",
            Intent::SpecificInquiry => "specific_inquiry",
            Intent::GeneralInquiry => "general_inquiry",
            Intent::Unknown => "unknown",
        }
    }

    /// Intents answered by criteria matching or the fallback recommender.
    pub fn is_criteria_bearing(&self) -> bool {
        matches!(
            self,
            Intent::LocationInquiry
                | Intent::PriceInquiry
                | Intent::CategoryKeywordInquiry
                | Intent::SpecificInquiry
        )
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How finely criteria-bearing intents are labeled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentGranularity {
    /// One [`Intent::SpecificInquiry`] label for every criteria signal.
    #[default]
    Coarse,
    /// Surface the strongest signal as its own intent.
    Fine,
}

/// Greeting tokens; one anywhere in the message wins outright.
const GREETING_WORDS: &[&str] = &["hi", "hello", "hey", "greetings"];

/// The stem every token of a broad listing request reduces to.
const LISTING_STEM: &str = "event";

/// Rule-cascade classifier over analyzed message text.
pub struct IntentClassifier {
    analyzer: Arc<dyn Analyzer>,
    surface: PipelineAnalyzer,
    vocabulary: CatalogVocabulary,
    granularity: IntentGranularity,
}

impl IntentClassifier {
    pub fn new(
        analyzer: Arc<dyn Analyzer>,
        vocabulary: CatalogVocabulary,
        granularity: IntentGranularity,
    ) -> IntentClassifier {
        let surface = PipelineAnalyzer::new(Arc::new(WordTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .with_name("surface");
        IntentClassifier {
            analyzer,
            surface,
            vocabulary,
            granularity,
        }
    }

    pub fn granularity(&self) -> IntentGranularity {
        self.granularity
    }

    /// Classify a message, consulting the criteria already extracted from it.
    pub fn classify(&self, message: &str, query: &ExtractedQuery) -> Intent {
        let surface = self.surface_tokens(message);

        if surface
            .iter()
            .any(|t| GREETING_WORDS.contains(&t.text.as_str()))
        {
            return Intent::Greeting;
        }

        if is_bare_events_query(message) {
            return Intent::GeneralInquiry;
        }

        // "show me events", "list all events": every content word reduces
        // to the listing stem. Checked before the vocabulary so a catalog
        // category named "events" cannot reroute the broad request.
        let stems = self.analyzed_stems(message);
        if !stems.is_empty() && stems.iter().all(|s| s == LISTING_STEM) {
            return Intent::EventInquiry;
        }

        if self.vocabulary.hit(&surface) {
            return Intent::SpecificInquiry;
        }

        let has_locations = !query.locations.is_empty();
        let has_prices = !query.price_mentions.is_empty();
        let has_keywords = !query.keywords.is_empty();
        let has_window = query.time_window.is_some();
        if has_locations || has_prices || has_keywords || has_window {
            return match self.granularity {
                IntentGranularity::Coarse => Intent::SpecificInquiry,
                IntentGranularity::Fine => {
                    if has_locations {
                        Intent::LocationInquiry
                    } else if has_prices {
                        Intent::PriceInquiry
                    } else if has_keywords {
                        Intent::CategoryKeywordInquiry
                    } else {
                        Intent::SpecificInquiry
                    }
                }
            };
        }

        if !surface
            .iter()
            .any(|t| t.text.chars().any(char::is_alphabetic))
        {
            return Intent::Unknown;
        }

        Intent::GeneralInquiry
    }

    fn surface_tokens(&self, message: &str) -> Vec<Token> {
        match self.surface.analyze(message) {
            Ok(stream) => stream.collect(),
            Err(error) => {
                warn!(%error, "surface analysis failed");
                Vec::new()
            }
        }
    }

    fn analyzed_stems(&self, message: &str) -> Vec<String> {
        match self.analyzer.analyze(message) {
            Ok(stream) => stream.map(|t| t.text).collect(),
            Err(error) => {
                warn!(%error, "intent analysis failed");
                Vec::new()
            }
        }
    }
}

/// The catalog-wide "events?" query, tolerant of trailing punctuation.
fn is_bare_events_query(message: &str) -> bool {
    message
        .trim()
        .trim_end_matches(['?', '!', '.'])
        .trim_end()
        .eq_ignore_ascii_case("events")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::analysis::StandardAnalyzer;
    use crate::catalog::{Catalog, EventRecord};
    use crate::extract::{Gazetteer, QueryExtractor};

    fn sample_event() -> EventRecord {
        EventRecord {
            name: "Summer Jam".to_string(),
            description: "open air rock concert by the river".to_string(),
            start_time: "2024-07-01 20:00:00".to_string(),
            end_time: "2024-07-01 23:00:00".to_string(),
            venue: "Dom Mladih".to_string(),
            city: "sarajevo".to_string(),
            category: "concert".to_string(),
            genre: "rock".to_string(),
            price: "20 BAM".to_string(),
        }
    }

    fn setup(granularity: IntentGranularity) -> (IntentClassifier, QueryExtractor) {
        let catalog = Catalog::new(vec![sample_event()]);
        let analyzer: Arc<dyn Analyzer> = Arc::new(StandardAnalyzer::new());
        let vocabulary = CatalogVocabulary::from_catalog(&catalog);
        let classifier = IntentClassifier::new(analyzer.clone(), vocabulary, granularity);
        let extractor = QueryExtractor::new(
            analyzer,
            Gazetteer::new().with_places(catalog.distinct_cities()),
            "BAM",
        )
        .unwrap();
        (classifier, extractor)
    }

    fn classify(message: &str, granularity: IntentGranularity) -> Intent {
        let (classifier, extractor) = setup(granularity);
        let today = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let query = extractor.extract_at(message, today);
        classifier.classify(message, &query)
    }

    fn classify_coarse(message: &str) -> Intent {
        classify(message, IntentGranularity::Coarse)
    }

    #[test]
    fn test_greeting_wins_over_everything() {
        assert_eq!(classify_coarse("hello"), Intent::Greeting);
        assert_eq!(classify_coarse("Hey there!"), Intent::Greeting);
        assert_eq!(
            classify_coarse("Hello, any concerts in Sarajevo next week?"),
            Intent::Greeting
        );
    }

    #[test]
    fn test_bare_events_query_is_general() {
        assert_eq!(classify_coarse("events?"), Intent::GeneralInquiry);
        assert_eq!(classify_coarse("  Events "), Intent::GeneralInquiry);
        assert_eq!(classify_coarse("EVENTS!"), Intent::GeneralInquiry);
    }

    #[test]
    fn test_broad_listing_request() {
        assert_eq!(classify_coarse("show me events"), Intent::EventInquiry);
        assert_eq!(classify_coarse("are there any events"), Intent::EventInquiry);
        assert_eq!(classify_coarse("any events"), Intent::EventInquiry);
    }

    #[test]
    fn test_vocabulary_phrase_is_specific() {
        assert_eq!(
            classify_coarse("what is on at dom mladih"),
            Intent::SpecificInquiry
        );
        assert_eq!(classify_coarse("when is summer jam"), Intent::SpecificInquiry);
    }

    #[test]
    fn test_extractor_signals_are_specific_when_coarse() {
        assert_eq!(
            classify_coarse("anything in Mostar?"),
            Intent::SpecificInquiry
        );
        assert_eq!(classify_coarse("under 20 BAM"), Intent::SpecificInquiry);
        assert_eq!(classify_coarse("anything next week?"), Intent::SpecificInquiry);
    }

    #[test]
    fn test_fine_granularity_surfaces_strongest_signal() {
        let fine = IntentGranularity::Fine;
        // Mostar is not in the one-event catalog vocabulary, so the
        // location signal comes from the gazetteer alone.
        assert_eq!(classify("anything in Mostar?", fine), Intent::LocationInquiry);
        assert_eq!(classify("under 20 BAM", fine), Intent::PriceInquiry);
        assert_eq!(
            classify("some jazz maybe", fine),
            Intent::CategoryKeywordInquiry
        );
        // Time window alone has no dedicated fine label.
        assert_eq!(classify("anything next week?", fine), Intent::SpecificInquiry);
    }

    #[test]
    fn test_location_outranks_price_when_fine() {
        assert_eq!(
            classify("in Mostar under 20 BAM", IntentGranularity::Fine),
            Intent::LocationInquiry
        );
    }

    #[test]
    fn test_no_alphabetic_content_is_unknown() {
        assert_eq!(classify_coarse(""), Intent::Unknown);
        assert_eq!(classify_coarse("   "), Intent::Unknown);
        assert_eq!(classify_coarse("???"), Intent::Unknown);
        assert_eq!(classify_coarse("12345"), Intent::Unknown);
    }

    #[test]
    fn test_stopword_only_message_is_general() {
        assert_eq!(classify_coarse("how are you"), Intent::GeneralInquiry);
        assert_eq!(classify_coarse("what do you have"), Intent::GeneralInquiry);
    }

    #[test]
    fn test_intent_labels() {
        assert_eq!(Intent::Greeting.as_str(), "greeting");
        assert_eq!(Intent::SpecificInquiry.to_string(), "specific_inquiry");
        assert!(Intent::LocationInquiry.is_criteria_bearing());
        assert!(!Intent::Greeting.is_criteria_bearing());
    }
}
