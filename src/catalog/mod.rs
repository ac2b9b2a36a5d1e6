//! The event catalog: records, CSV ingestion and the immutable store.
//!
//! A [`Catalog`] is loaded once at startup and never mutated afterwards;
//! every component that needs event data reads from it by reference. The
//! distinct-value accessors feed the one-hot vocabularies and the location
//! gazetteer.

pub mod event;
pub mod loader;

use std::collections::BTreeSet;

pub use event::{EventRecord, parse_event_datetime};
pub use loader::{ESSENTIAL_FIELDS, load_events_csv, read_events_csv};

/// The immutable set of events available for querying.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    events: Vec<EventRecord>,
}

impl Catalog {
    /// Create a catalog from a list of events.
    pub fn new(events: Vec<EventRecord>) -> Self {
        Catalog { events }
    }

    /// Number of events in the catalog.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the catalog holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events, in ingestion order.
    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    /// Get an event by its ordinal (ingestion position).
    pub fn get(&self, ordinal: usize) -> Option<&EventRecord> {
        self.events.get(ordinal)
    }

    /// Iterate over all events.
    pub fn iter(&self) -> std::slice::Iter<'_, EventRecord> {
        self.events.iter()
    }

    /// Sorted distinct city values.
    pub fn distinct_cities(&self) -> Vec<String> {
        self.distinct(|e| &e.city)
    }

    /// Sorted distinct category values.
    pub fn distinct_categories(&self) -> Vec<String> {
        self.distinct(|e| &e.category)
    }

    /// Sorted distinct genre values.
    pub fn distinct_genres(&self) -> Vec<String> {
        self.distinct(|e| &e.genre)
    }

    fn distinct<F>(&self, field: F) -> Vec<String>
    where
        F: Fn(&EventRecord) -> &String,
    {
        let set: BTreeSet<&str> = self
            .events
            .iter()
            .map(|e| field(e).as_str())
            .filter(|v| !v.is_empty())
            .collect();
        set.into_iter().map(str::to_string).collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a EventRecord;
    type IntoIter = std::slice::Iter<'a, EventRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
