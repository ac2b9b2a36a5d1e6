//! Relative time-frame resolution.
//!
//! A fixed rule cascade turns phrases like "next week" or "in 3 days" into an
//! inclusive calendar-date window anchored at a reference day. Rules are
//! checked in order and the first hit wins; when none fires, the message is
//! handed to [`crate::extract::date_search`] for an explicit date.

use std::ops::Range;
use std::sync::LazyLock;

use chrono::{Datelike, Days, Months, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::extract::date_search;

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimeWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> TimeWindow {
        debug_assert!(start <= end);
        TimeWindow { start, end }
    }

    /// A window covering exactly one day.
    pub fn single_day(date: NaiveDate) -> TimeWindow {
        TimeWindow {
            start: date,
            end: date,
        }
    }

    /// Whether `date` falls inside the window, bounds included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

static NEXT_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bnext\s+year\b").unwrap());
static NEXT_MONTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bnext\s+month\b").unwrap());
static NEXT_WEEK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bnext\s+week\b").unwrap());
static IN_DAYS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bin\s+(\d+)\s+days?\b").unwrap());
static IN_WEEKS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bin\s+(\d+)\s+weeks?\b").unwrap());
static IN_MONTHS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bin\s+(\d+)\s+months?\b").unwrap());

/// Resolve a time frame from `message`, anchored at `today`.
///
/// Returns the window together with the byte span of the phrase that
/// produced it, so callers can keep the phrase out of keyword extraction.
pub fn resolve_time_frame(message: &str, today: NaiveDate) -> Option<(TimeWindow, Range<usize>)> {
    if let Some(m) = NEXT_YEAR_RE.find(message) {
        if let Some(window) = next_year_window(today) {
            return Some((window, m.range()));
        }
    }
    if let Some(m) = NEXT_MONTH_RE.find(message) {
        if let Some(window) = next_month_window(today) {
            return Some((window, m.range()));
        }
    }
    if let Some(m) = NEXT_WEEK_RE.find(message) {
        let start = today.checked_add_days(Days::new(7))?;
        let end = start.checked_add_days(Days::new(6))?;
        return Some((TimeWindow::new(start, end), m.range()));
    }
    if let Some(caps) = IN_DAYS_RE.captures(message) {
        let whole = caps.get(0)?;
        let n: u64 = caps.get(1)?.as_str().parse().ok()?;
        let day = today.checked_add_days(Days::new(n))?;
        return Some((TimeWindow::single_day(day), whole.range()));
    }
    if let Some(caps) = IN_WEEKS_RE.captures(message) {
        let whole = caps.get(0)?;
        let n: u64 = caps.get(1)?.as_str().parse().ok()?;
        let day = today.checked_add_days(Days::new(n.checked_mul(7)?))?;
        return Some((TimeWindow::single_day(day), whole.range()));
    }
    if let Some(caps) = IN_MONTHS_RE.captures(message) {
        let whole = caps.get(0)?;
        let n: u32 = caps.get(1)?.as_str().parse().ok()?;
        let day = today.checked_add_months(Months::new(n))?;
        return Some((TimeWindow::single_day(day), whole.range()));
    }

    let (date, span) = date_search::search_date(message, today)?;
    Some((TimeWindow::single_day(date), span))
}

/// January 1 through December 31 of the following year.
fn next_year_window(today: NaiveDate) -> Option<TimeWindow> {
    let year = today.year().checked_add(1)?;
    let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let end = NaiveDate::from_ymd_opt(year, 12, 31)?;
    Some(TimeWindow::new(start, end))
}

/// The whole calendar month after the current one.
fn next_month_window(today: NaiveDate) -> Option<TimeWindow> {
    let start = today.with_day(1)?.checked_add_months(Months::new(1))?;
    let end = start.checked_add_months(Months::new(1))?.pred_opt()?;
    Some(TimeWindow::new(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_next_week_is_seven_days_out() {
        let today = date(2024, 6, 3);
        let (window, _) = resolve_time_frame("any events next week?", today).unwrap();
        assert_eq!(window.start, date(2024, 6, 10));
        assert_eq!(window.end, date(2024, 6, 16));
    }

    #[test]
    fn test_next_month_covers_the_calendar_month() {
        let today = date(2024, 6, 17);
        let (window, _) = resolve_time_frame("concerts next month", today).unwrap();
        assert_eq!(window.start, date(2024, 7, 1));
        assert_eq!(window.end, date(2024, 7, 31));
    }

    #[test]
    fn test_next_month_across_year_end() {
        let today = date(2024, 12, 5);
        let (window, _) = resolve_time_frame("next month", today).unwrap();
        assert_eq!(window.start, date(2025, 1, 1));
        assert_eq!(window.end, date(2025, 1, 31));
    }

    #[test]
    fn test_next_year_spans_the_full_year() {
        let today = date(2024, 6, 3);
        let (window, _) = resolve_time_frame("festivals next year", today).unwrap();
        assert_eq!(window.start, date(2025, 1, 1));
        assert_eq!(window.end, date(2025, 12, 31));
    }

    #[test]
    fn test_in_n_days_is_a_single_day() {
        let today = date(2024, 6, 3);
        let (window, _) = resolve_time_frame("what about in 5 days", today).unwrap();
        assert_eq!(window, TimeWindow::single_day(date(2024, 6, 8)));
    }

    #[test]
    fn test_in_n_weeks() {
        let today = date(2024, 6, 3);
        let (window, _) = resolve_time_frame("in 2 weeks", today).unwrap();
        assert_eq!(window, TimeWindow::single_day(date(2024, 6, 17)));
    }

    #[test]
    fn test_in_n_months_clamps_to_month_end() {
        let today = date(2024, 1, 31);
        let (window, _) = resolve_time_frame("in 1 month", today).unwrap();
        assert_eq!(window, TimeWindow::single_day(date(2024, 2, 29)));
    }

    #[test]
    fn test_named_rules_win_over_date_search() {
        let today = date(2024, 6, 3);
        let (window, span) = resolve_time_frame("next week, not on 20.07.2024", today).unwrap();
        assert_eq!(window.start, date(2024, 6, 10));
        assert_eq!(span, 0..9);
    }

    #[test]
    fn test_explicit_date_falls_through_to_search() {
        let today = date(2024, 6, 3);
        let (window, _) = resolve_time_frame("anything on 20.07.2024?", today).unwrap();
        assert_eq!(window, TimeWindow::single_day(date(2024, 7, 20)));
    }

    #[test]
    fn test_no_temporal_phrase() {
        let today = date(2024, 6, 3);
        assert!(resolve_time_frame("rock concerts in Mostar", today).is_none());
    }

    #[test]
    fn test_span_covers_the_phrase() {
        let message = "show events in 10 days please";
        let today = date(2024, 6, 3);
        let (_, span) = resolve_time_frame(message, today).unwrap();
        assert_eq!(&message[span], "in 10 days");
    }

    #[test]
    fn test_window_contains_bounds() {
        let window = TimeWindow::new(date(2024, 6, 10), date(2024, 6, 16));
        assert!(window.contains(date(2024, 6, 10)));
        assert!(window.contains(date(2024, 6, 16)));
        assert!(!window.contains(date(2024, 6, 17)));
        assert!(!window.contains(date(2024, 6, 9)));
    }
}
