//! Dialogue orchestration.
//!
//! [`ChatEngine`] wires the whole pipeline together: catalog, extractor,
//! classifier, matcher and recommender are built once, then every message
//! runs extract → classify → branch → format, with no state carried
//! between messages. All shared structures are read-only after
//! construction, so one engine serves concurrent callers without locking.
//!
//! # Example
//!
//! ```
//! use marquee::catalog::{Catalog, EventRecord};
//! use marquee::config::EngineConfig;
//! use marquee::engine::ChatEngine;
//!
//! let catalog = Catalog::new(vec![EventRecord {
//!     name: "Summer Jam".to_string(),
//!     description: "open air rock concert".to_string(),
//!     start_time: "2024-07-01 20:00:00".to_string(),
//!     end_time: "2024-07-01 23:00:00".to_string(),
//!     venue: "Skenderija".to_string(),
//!     city: "sarajevo".to_string(),
//!     category: "concert".to_string(),
//!     genre: "rock".to_string(),
//!     price: "15 BAM".to_string(),
//! }]);
//!
//! let engine = ChatEngine::new(catalog, EngineConfig::default()).unwrap();
//! let reply = engine.handle_message("hello");
//! assert!(reply.as_text().is_some());
//! ```

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use rand::seq::IndexedRandom;
use tracing::debug;

use crate::analysis::{Analyzer, StandardAnalyzer};
use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::extract::{ExtractedQuery, Gazetteer, QueryExtractor};
use crate::intent::{CatalogVocabulary, Intent, IntentClassifier};
use crate::matching::CriteriaMatcher;
use crate::recommend::Recommender;
use crate::respond::{
    GREETING_TEXT, GUIDANCE_TEXT, NO_EVENTS_TEXT, NO_MATCHES_TEXT, Reply, UNKNOWN_TEXT,
};

/// The assembled query-understanding pipeline.
pub struct ChatEngine {
    catalog: Arc<Catalog>,
    config: EngineConfig,
    extractor: QueryExtractor,
    classifier: IntentClassifier,
    matcher: CriteriaMatcher,
    recommender: Recommender,
}

impl ChatEngine {
    /// Build an engine over a loaded catalog.
    ///
    /// Fits the intent vocabulary and the recommender feature space once;
    /// the catalog is immutable from here on.
    pub fn new(catalog: Catalog, config: EngineConfig) -> Result<ChatEngine> {
        config.validate()?;

        let catalog = Arc::new(catalog);
        let analyzer: Arc<dyn Analyzer> = Arc::new(StandardAnalyzer::new());

        let gazetteer = Gazetteer::new().with_places(catalog.distinct_cities());
        let extractor = QueryExtractor::new(analyzer.clone(), gazetteer, &config.currency)?;

        let vocabulary = CatalogVocabulary::from_catalog(&catalog);
        let classifier = IntentClassifier::new(analyzer.clone(), vocabulary, config.granularity);

        let matcher = CriteriaMatcher::new(config.match_mode);
        let recommender = Recommender::build(
            catalog.clone(),
            analyzer,
            config.metric,
            config.max_terms,
        );

        Ok(ChatEngine {
            catalog,
            config,
            extractor,
            classifier,
            matcher,
            recommender,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn recommender(&self) -> &Recommender {
        &self.recommender
    }

    /// Classify a message without producing a reply.
    pub fn classify(&self, message: &str) -> Intent {
        self.classify_at(message, Local::now().date_naive())
    }

    pub fn classify_at(&self, message: &str, today: NaiveDate) -> Intent {
        let query = self.extractor.extract_at(message, today);
        self.classifier.classify(message, &query)
    }

    /// Answer one message relative to the current local date.
    pub fn handle_message(&self, message: &str) -> Reply {
        self.handle_message_at(message, Local::now().date_naive())
    }

    /// Answer one message relative to an explicit reference day.
    ///
    /// Total: every path, including degraded ones, produces a reply.
    pub fn handle_message_at(&self, message: &str, today: NaiveDate) -> Reply {
        let query = self.extractor.extract_at(message, today);
        let intent = self.classifier.classify(message, &query);
        debug!(%intent, criteria = query.has_criteria(), "classified message");

        match intent {
            Intent::Greeting => Reply::text(GREETING_TEXT),
            Intent::EventInquiry => self.list_events(),
            Intent::LocationInquiry
            | Intent::PriceInquiry
            | Intent::CategoryKeywordInquiry
            | Intent::SpecificInquiry => self.answer_inquiry(message, &query),
            Intent::GeneralInquiry => self.sample_events(),
            Intent::Unknown => Reply::text(format!("{UNKNOWN_TEXT} {GUIDANCE_TEXT}")),
        }
    }

    /// Criteria-bearing branch: filter when criteria exist, otherwise fall
    /// back to similarity. The two strategies are alternatives, never
    /// chained; an empty filter result stays a "no matches" answer.
    fn answer_inquiry(&self, message: &str, query: &ExtractedQuery) -> Reply {
        if query.has_criteria() {
            let matched = self.matcher.filter(&self.catalog, query);
            debug!(matched = matched.len(), "criteria matching done");
            if matched.is_empty() {
                Reply::text(NO_MATCHES_TEXT)
            } else {
                Reply::from_records(matched)
            }
        } else {
            let recommended = self.recommender.recommend(message, self.config.neighbors);
            debug!(recommended = recommended.len(), "similarity fallback done");
            if recommended.is_empty() {
                Reply::text(NO_MATCHES_TEXT)
            } else {
                Reply::from_records(recommended)
            }
        }
    }

    /// Broad listing: the first `listing_limit` events in catalog order.
    fn list_events(&self) -> Reply {
        if self.catalog.is_empty() {
            return Reply::text(NO_EVENTS_TEXT);
        }
        Reply::from_records(self.catalog.iter().take(self.config.listing_limit))
    }

    /// Representative sample: `sample_size` events drawn uniformly.
    fn sample_events(&self) -> Reply {
        if self.catalog.is_empty() {
            return Reply::text(NO_EVENTS_TEXT);
        }
        let mut rng = rand::rng();
        let sampled = self
            .catalog
            .events()
            .choose_multiple(&mut rng, self.config.sample_size);
        Reply::from_records(sampled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EventRecord;

    fn event(name: &str, city: &str, price: &str, start: &str) -> EventRecord {
        EventRecord {
            name: name.to_string(),
            description: format!("{name} live in {city}"),
            start_time: start.to_string(),
            end_time: String::new(),
            venue: "Main Hall".to_string(),
            city: city.to_string(),
            category: "concert".to_string(),
            genre: "rock".to_string(),
            price: price.to_string(),
        }
    }

    fn engine_with(events: Vec<EventRecord>) -> ChatEngine {
        ChatEngine::new(Catalog::new(events), EngineConfig::default()).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    #[test]
    fn test_greeting_branch() {
        let engine = engine_with(vec![event("A", "sarajevo", "10 BAM", "2024-07-01 20:00:00")]);
        let reply = engine.handle_message_at("hello", today());
        assert_eq!(reply.as_text(), Some(GREETING_TEXT));
    }

    #[test]
    fn test_listing_branch_respects_the_limit() {
        let events = (0..15)
            .map(|i| event(&format!("Event {i}"), "sarajevo", "10 BAM", "2024-07-01 20:00:00"))
            .collect();
        let engine = engine_with(events);
        let reply = engine.handle_message_at("show me events", today());
        assert_eq!(reply.as_events().map(<[_]>::len), Some(10));
    }

    #[test]
    fn test_matching_branch_returns_no_matches_text() {
        let engine = engine_with(vec![event("A", "sarajevo", "10 BAM", "2024-07-01 20:00:00")]);
        let reply = engine.handle_message_at("anything in Mostar?", today());
        assert_eq!(reply.as_text(), Some(NO_MATCHES_TEXT));
    }

    #[test]
    fn test_empty_catalog_never_raises() {
        let engine = engine_with(Vec::new());
        for message in ["events?", "show me events", "hello", "rock in Sarajevo", "???"] {
            let _ = engine.handle_message_at(message, today());
        }
        let reply = engine.handle_message_at("events?", today());
        assert_eq!(reply.as_text(), Some(NO_EVENTS_TEXT));
    }

    #[test]
    fn test_unknown_branch_gives_guidance() {
        let engine = engine_with(vec![event("A", "sarajevo", "10 BAM", "2024-07-01 20:00:00")]);
        let reply = engine.handle_message_at("12345", today());
        let text = reply.as_text().unwrap();
        assert!(text.contains(UNKNOWN_TEXT));
        assert!(text.contains("For example"));
    }

    #[test]
    fn test_general_branch_samples_bounded() {
        let events = (0..12)
            .map(|i| event(&format!("Event {i}"), "sarajevo", "10 BAM", "2024-07-01 20:00:00"))
            .collect();
        let engine = engine_with(events);
        let reply = engine.handle_message_at("how are you", today());
        assert_eq!(reply.as_events().map(<[_]>::len), Some(5));
    }
}
