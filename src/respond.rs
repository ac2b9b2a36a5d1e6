//! User-facing reply types and canned texts.
//!
//! The engine's contract is data, not markup: a [`Reply`] is either a list
//! of [`EventSummary`] rows or plain text, and the embedding shell decides
//! how to serialize it. Summaries carry the fields a listing needs; dates
//! render day-first, and an unparsable start time renders as
//! [`UNKNOWN_DATE_TEXT`] rather than being dropped.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::EventRecord;

pub const GREETING_TEXT: &str = "Hi there! How can I assist you with event information today?";
pub const NO_MATCHES_TEXT: &str = "No matching events found.";
pub const NO_EVENTS_TEXT: &str = "There are no events available right now.";
pub const UNKNOWN_TEXT: &str = "Sorry, I didn't quite understand that.";
pub const GUIDANCE_TEXT: &str = "You can ask me about events, locations, times and prices. \
     For example, 'What events are happening in Sarajevo next week?'";
pub const UNKNOWN_DATE_TEXT: &str = "Unknown date";

/// Listing row for one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSummary {
    pub name: String,
    /// Start date rendered day-first (`DD-MM-YYYY`).
    pub date: String,
    pub venue: String,
    pub city: String,
    pub category: String,
    pub genre: String,
    pub price: String,
}

impl EventSummary {
    pub fn from_event(event: &EventRecord) -> EventSummary {
        let date = event
            .parsed_start()
            .map(|start| start.format("%d-%m-%Y").to_string())
            .unwrap_or_else(|| UNKNOWN_DATE_TEXT.to_string());
        EventSummary {
            name: event.name.clone(),
            date,
            venue: event.venue.clone(),
            city: event.city.clone(),
            category: event.category.clone(),
            genre: event.genre.clone(),
            price: event.price.clone(),
        }
    }
}

impl fmt::Display for EventSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {}, {} | {}/{} | {}",
            self.name, self.date, self.venue, self.city, self.category, self.genre, self.price
        )
    }
}

/// What the engine hands back for one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reply {
    Events { events: Vec<EventSummary> },
    Text { text: String },
}

impl Reply {
    pub fn text<S: Into<String>>(text: S) -> Reply {
        Reply::Text { text: text.into() }
    }

    pub fn events(events: Vec<EventSummary>) -> Reply {
        Reply::Events { events }
    }

    /// Summarize a sequence of records into an events reply.
    pub fn from_records<'a, I>(records: I) -> Reply
    where
        I: IntoIterator<Item = &'a EventRecord>,
    {
        Reply::Events {
            events: records.into_iter().map(EventSummary::from_event).collect(),
        }
    }

    pub fn as_events(&self) -> Option<&[EventSummary]> {
        match self {
            Reply::Events { events } => Some(events),
            Reply::Text { .. } => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Reply::Text { text } => Some(text),
            Reply::Events { .. } => None,
        }
    }
}
