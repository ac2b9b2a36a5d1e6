//! Criteria matching between extracted queries and catalog events.
//!
//! The matcher is a pure predicate: no catalog access, no clock, no
//! side effects. Under [`MatchMode::All`] an event matches only if every
//! present criterion holds (absent criteria pass vacuously); under
//! [`MatchMode::Any`] a single hitting criterion is enough. The two modes
//! are selected explicitly by configuration and never mixed.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, EventRecord};
use crate::extract::{ExtractedQuery, normalize_price};

/// How multiple extracted criteria combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Every present criterion must hold. A user naming a city and a price
    /// expects both honored.
    #[default]
    All,
    /// Any single hitting criterion is a success; suited to exploratory
    /// queries.
    Any,
}

/// Decides match/no-match for one event against one query.
#[derive(Debug, Clone, Copy, Default)]
pub struct CriteriaMatcher {
    mode: MatchMode,
}

impl CriteriaMatcher {
    pub fn new(mode: MatchMode) -> CriteriaMatcher {
        CriteriaMatcher { mode }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Whether `event` satisfies `query` under the configured mode.
    pub fn matches(&self, event: &EventRecord, query: &ExtractedQuery) -> bool {
        match self.mode {
            MatchMode::All => self.matches_all(event, query),
            MatchMode::Any => self.matches_any(event, query),
        }
    }

    /// All events of the catalog satisfying `query`, in catalog order.
    pub fn filter<'a>(&self, catalog: &'a Catalog, query: &ExtractedQuery) -> Vec<&'a EventRecord> {
        catalog
            .iter()
            .filter(|event| self.matches(event, query))
            .collect()
    }

    fn matches_all(&self, event: &EventRecord, query: &ExtractedQuery) -> bool {
        let text = event.searchable_text();

        if !query.keywords.iter().all(|k| text.contains(k.as_str())) {
            return false;
        }

        if let Some(window) = &query.time_window {
            // An unresolvable start time is missing data, not a mismatch.
            if let Some(start) = event.parsed_start() {
                if !window.contains(start.date()) {
                    return false;
                }
            }
        }

        if !query.price_mentions.is_empty() {
            let Some(amount) = normalize_price(&event.price) else {
                return false;
            };
            if !query.price_mentions.iter().any(|m| m.accepts(amount)) {
                return false;
            }
        }

        true
    }

    fn matches_any(&self, event: &EventRecord, query: &ExtractedQuery) -> bool {
        if !query.has_criteria() {
            return true;
        }

        let text = event.searchable_text();
        if query.keywords.iter().any(|k| text.contains(k.as_str())) {
            return true;
        }

        if let Some(window) = &query.time_window {
            if let Some(start) = event.parsed_start() {
                if window.contains(start.date()) {
                    return true;
                }
            }
        }

        if let Some(amount) = normalize_price(&event.price) {
            if query.price_mentions.iter().any(|m| m.accepts(amount)) {
                return true;
            }
        }

        false
    }
}
