//! Entity and time-frame extraction from user messages.
//!
//! [`QueryExtractor`] pulls the structured parts out of a free-text message:
//! place names via the [`Gazetteer`], price mentions via [`PriceScanner`],
//! a time window via the rule cascade in [`time_frame`], and whatever
//! content words remain as lemmatized keywords. Spans consumed by the price
//! and time scanners are excluded from keyword extraction, so "next week"
//! contributes a time window and not a "week" keyword.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use chrono::NaiveDate;
//! use marquee::analysis::StandardAnalyzer;
//! use marquee::extract::{Gazetteer, QueryExtractor};
//!
//! let extractor = QueryExtractor::new(
//!     Arc::new(StandardAnalyzer::new()),
//!     Gazetteer::new(),
//!     "BAM",
//! )
//! .unwrap();
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
//! let query = extractor.extract_at("Rock concerts in Sarajevo next week", today);
//!
//! assert_eq!(query.locations, vec!["sarajevo".to_string()]);
//! assert!(query.time_window.is_some());
//! assert!(query.keywords.contains("rock"));
//! assert!(query.keywords.contains("concert"));
//! ```

pub mod date_search;
pub mod gazetteer;
pub mod price;
pub mod time_frame;

pub use gazetteer::Gazetteer;
pub use price::{PriceMention, PriceQualifier, PriceScanner, canonical_price, normalize_price};
pub use time_frame::{TimeWindow, resolve_time_frame};

use std::collections::BTreeSet;
use std::ops::Range;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::warn;

use crate::analysis::{Analyzer, LowercaseFilter, PipelineAnalyzer, Token, WordTokenizer};
use crate::error::Result;

/// Keyword stems that merely restate the domain and never narrow a search.
const DOMAIN_STOP_STEMS: &[&str] = &["event"];

/// Structured criteria extracted from one message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedQuery {
    /// Recognized place names, in order of first appearance.
    pub locations: Vec<String>,
    /// Resolved time window, if the message carried a temporal phrase.
    pub time_window: Option<TimeWindow>,
    /// Price mentions, in order of appearance.
    pub price_mentions: Vec<PriceMention>,
    /// Lemmatized content words not claimed by the other extractors.
    pub keywords: BTreeSet<String>,
}

impl ExtractedQuery {
    /// Whether any criterion at all was extracted.
    pub fn has_criteria(&self) -> bool {
        !self.locations.is_empty()
            || self.time_window.is_some()
            || !self.price_mentions.is_empty()
            || !self.keywords.is_empty()
    }
}

/// Runs all extractors over a message and assembles an [`ExtractedQuery`].
pub struct QueryExtractor {
    analyzer: Arc<dyn Analyzer>,
    surface: PipelineAnalyzer,
    gazetteer: Gazetteer,
    prices: PriceScanner,
}

impl QueryExtractor {
    /// Build an extractor.
    ///
    /// `analyzer` produces the keyword stream (lowercased, stopped,
    /// stemmed); the gazetteer is scanned over a separate surface stream
    /// that is only lowercased, so place names are matched unstemmed.
    pub fn new(
        analyzer: Arc<dyn Analyzer>,
        gazetteer: Gazetteer,
        currency: &str,
    ) -> Result<QueryExtractor> {
        let surface = PipelineAnalyzer::new(Arc::new(WordTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .with_name("surface");
        Ok(QueryExtractor {
            analyzer,
            surface,
            gazetteer,
            prices: PriceScanner::new(currency)?,
        })
    }

    pub fn gazetteer(&self) -> &Gazetteer {
        &self.gazetteer
    }

    /// Extract criteria relative to the current local date.
    pub fn extract(&self, message: &str) -> ExtractedQuery {
        self.extract_at(message, Local::now().date_naive())
    }

    /// Extract criteria relative to an explicit reference day.
    pub fn extract_at(&self, message: &str, today: NaiveDate) -> ExtractedQuery {
        let mut consumed: Vec<Range<usize>> = Vec::new();

        let mut price_mentions = Vec::new();
        for (mention, span) in self.prices.scan(message) {
            price_mentions.push(mention);
            consumed.push(span);
        }

        let time_window = match resolve_time_frame(message, today) {
            Some((window, span)) => {
                consumed.push(span);
                Some(window)
            }
            None => None,
        };

        let locations = self.gazetteer.scan(&self.surface_tokens(message));

        let keywords = self
            .keyword_tokens(message)
            .into_iter()
            .filter(|token| !overlaps(&consumed, token.start_offset, token.end_offset))
            .filter(|token| token.text.chars().any(char::is_alphabetic))
            .filter(|token| !DOMAIN_STOP_STEMS.contains(&token.text.as_str()))
            .map(|token| token.text)
            .collect();

        ExtractedQuery {
            locations,
            time_window,
            price_mentions,
            keywords,
        }
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

    fn keyword_tokens(&self, message: &str) -> Vec<Token> {
        match self.analyzer.analyze(message) {
            Ok(stream) => stream.collect(),
            Err(error) => {
                warn!(%error, "keyword analysis failed");
                Vec::new()
            }
        }
    }
}

fn overlaps(consumed: &[Range<usize>], start: usize, end: usize) -> bool {
    consumed.iter().any(|span| start < span.end && span.start < end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::StandardAnalyzer;

    fn extractor() -> QueryExtractor {
        QueryExtractor::new(Arc::new(StandardAnalyzer::new()), Gazetteer::new(), "BAM").unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_city_and_week_scenario() {
        let query = extractor().extract_at(
            "Are there any events in Sarajevo next week?",
            date(2024, 6, 3),
        );

        assert_eq!(query.locations, vec!["sarajevo".to_string()]);
        let window = query.time_window.unwrap();
        assert_eq!(window.start, date(2024, 6, 10));
        assert_eq!(window.end, date(2024, 6, 16));

        // "events" restates the domain and "week" belongs to the time
        // phrase; neither may survive as a keyword.
        assert!(!query.keywords.contains("event"));
        assert!(!query.keywords.contains("week"));
        assert!(query.keywords.contains("sarajevo"));
    }

    #[test]
    fn test_price_span_is_not_a_keyword() {
        let query = extractor().extract_at(
            "Any events under 20 BAM in Sarajevo?",
            date(2024, 6, 3),
        );

        assert_eq!(query.price_mentions.len(), 1);
        assert_eq!(query.price_mentions[0].amount, 20.0);
        assert_eq!(query.price_mentions[0].qualifier, PriceQualifier::AtMost);
        assert!(!query.keywords.contains("bam"));
        assert!(!query.keywords.iter().any(|k| k.contains("20")));
    }

    #[test]
    fn test_keywords_are_stemmed() {
        let query = extractor().extract_at("Any rock concerts?", date(2024, 6, 3));
        assert!(query.keywords.contains("rock"));
        assert!(query.keywords.contains("concert"));
        assert!(query.time_window.is_none());
        assert!(query.locations.is_empty());
    }

    #[test]
    fn test_single_day_window_keeps_other_keywords() {
        let query = extractor().extract_at("jazz in 3 days", date(2024, 6, 3));
        assert_eq!(
            query.time_window,
            Some(TimeWindow::single_day(date(2024, 6, 6)))
        );
        assert!(query.keywords.contains("jazz"));
        assert!(!query.keywords.contains("day"));
    }

    #[test]
    fn test_no_criteria() {
        let query = extractor().extract_at("show me", date(2024, 6, 3));
        assert!(!query.has_criteria());
    }

    #[test]
    fn test_two_word_city() {
        let query = extractor().extract_at("concerts in Banja Luka", date(2024, 6, 3));
        assert_eq!(query.locations, vec!["banja luka".to_string()]);
    }
}
