//! Event records and their datetime handling.
//!
//! An [`EventRecord`] is one row of the ingested catalog. Raw field strings
//! are kept as loaded; only the categorical fields (`city`, `category`,
//! `genre`) arrive lowercased from the loader. Start times stay raw too and
//! are parsed on demand through a fixed format cascade, day-first for the
//! ambiguous numeric forms.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A single event from the catalog.
///
/// The essential fields (`name`, `start_time`, `end_time`, `venue`, `city`,
/// `category`, `genre`) are guaranteed non-empty by the loader; `description`
/// may be empty and `price` defaults to `"N/A"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Event name, original casing.
    pub name: String,
    /// Free-text description, possibly empty.
    pub description: String,
    /// Raw start time string as ingested.
    pub start_time: String,
    /// Raw end time string as ingested.
    pub end_time: String,
    /// Venue name, original casing.
    pub venue: String,
    /// City, lowercased.
    pub city: String,
    /// Category, lowercased.
    pub category: String,
    /// Genre, lowercased.
    pub genre: String,
    /// Price string, `"N/A"` when absent.
    pub price: String,
}

impl EventRecord {
    /// Lowercased concatenation of the fields keyword matching runs against:
    /// description, city, venue, category and name.
    pub fn searchable_text(&self) -> String {
        [
            self.description.as_str(),
            self.city.as_str(),
            self.venue.as_str(),
            self.category.as_str(),
            self.name.as_str(),
        ]
        .join(" ")
        .to_lowercase()
    }

    /// Parse the event's start time, or `None` when the raw string fits no
    /// known format.
    pub fn parsed_start(&self) -> Option<NaiveDateTime> {
        parse_event_datetime(&self.start_time)
    }
}

/// Datetime formats tried in order for fields that carry a time of day.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d-%m-%Y %H:%M",
    "%d.%m.%Y %H:%M",
];

/// Date-only formats tried in order; ambiguous numeric forms read day-first.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%d.%m.%Y", "%d/%m/%Y"];

/// Parse an event datetime string through the format cascade.
///
/// RFC 3339 first, then the datetime formats, then date-only formats at
/// midnight. Returns `None` for anything unparseable; callers treat missing
/// dates as "no information", never as an error.
///
/// # Examples
///
/// ```
/// use marquee::catalog::parse_event_datetime;
///
/// let parsed = parse_event_datetime("2024-07-15 20:00:00").unwrap();
/// assert_eq!(parsed.format("%d-%m-%Y").to_string(), "15-07-2024");
///
/// assert!(parse_event_datetime("sometime in July").is_none());
/// ```
pub fn parse_event_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date.and_time(NaiveTime::MIN));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> EventRecord {
        EventRecord {
            name: "Jazz Nights".to_string(),
            description: "An evening of smooth jazz by the river".to_string(),
            start_time: "2024-07-15 20:00:00".to_string(),
            end_time: "2024-07-15 23:00:00".to_string(),
            venue: "River Stage".to_string(),
            city: "sarajevo".to_string(),
            category: "concert".to_string(),
            genre: "jazz".to_string(),
            price: "15 BAM".to_string(),
        }
    }

    #[test]
    fn test_searchable_text_field_order() {
        let text = event().searchable_text();
        assert_eq!(
            text,
            "an evening of smooth jazz by the river sarajevo river stage concert jazz nights"
        );
    }

    #[test]
    fn test_parsed_start() {
        let parsed = event().parsed_start().unwrap();
        assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2024, 7, 15).unwrap());
    }

    #[test]
    fn test_parse_rfc3339() {
        let parsed = parse_event_datetime("2024-07-15T20:00:00+02:00").unwrap();
        assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2024, 7, 15).unwrap());
    }

    #[test]
    fn test_parse_day_first_formats() {
        for raw in ["15-07-2024", "15.07.2024", "15/07/2024"] {
            let parsed = parse_event_datetime(raw).unwrap();
            assert_eq!(
                parsed.date(),
                NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
                "failed for {raw}"
            );
        }
    }

    #[test]
    fn test_iso_date_wins_over_day_first() {
        let parsed = parse_event_datetime("2024-06-03").unwrap();
        assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
    }

    #[test]
    fn test_unparseable_returns_none() {
        assert!(parse_event_datetime("").is_none());
        assert!(parse_event_datetime("next friday-ish").is_none());
        assert!(parse_event_datetime("32/13/2024").is_none());
    }
}
