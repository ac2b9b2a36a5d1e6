//! Explicit calendar-date search inside free text.
//!
//! Finds the first thing in a message that reads as a concrete date:
//! numeric forms ("20.07.2024", "2024-07-20"), spelled-out forms
//! ("15th of July", "July 15, 2024"), "today"/"tomorrow", weekday names and
//! bare month names. Numeric day-month-year order is day first. Forms that
//! carry no year resolve to their next future occurrence relative to the
//! reference day.

use std::ops::Range;
use std::sync::LazyLock;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use regex::Regex;

const MONTH_NAMES: &str = "january|february|march|april|may|june|july|august|september|october|november|december|sept|jan|feb|mar|apr|jun|jul|aug|sep|oct|nov|dec";

static ISO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b").unwrap());
static DMY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})[./-](\d{1,2})[./-](\d{2,4})\b").unwrap());
static DAY_MONTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(\d{{1,2}})(?:st|nd|rd|th)?(?:\s+of)?\s+({MONTH_NAMES})\b(?:,?\s+(\d{{4}}))?"
    ))
    .unwrap()
});
static MONTH_DAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b({MONTH_NAMES})\s+(\d{{1,2}})(?:st|nd|rd|th)?\b(?:,?\s+(\d{{4}}))?"
    ))
    .unwrap()
});
static BARE_MONTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)\b({MONTH_NAMES})\b")).unwrap());
static TODAY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\btoday\b").unwrap());
static TOMORROW_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\btomorrow\b").unwrap());
static WEEKDAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b").unwrap()
});

/// Find the first date mentioned in `message`, with its byte span.
///
/// Candidates from every supported form are collected and the one starting
/// earliest in the message wins; on equal starts the more specific form wins
/// (so "July 15" is a day, not a bare month).
pub fn search_date(message: &str, today: NaiveDate) -> Option<(NaiveDate, Range<usize>)> {
    let mut candidates: Vec<(usize, u8, NaiveDate, Range<usize>)> = Vec::new();

    for caps in ISO_RE.captures_iter(message) {
        let whole = caps.get(0)?;
        let date = ymd(
            parse_num(&caps, 1)?,
            parse_num(&caps, 2)? as u32,
            parse_num(&caps, 3)? as u32,
        );
        if let Some(date) = date {
            candidates.push((whole.start(), 1, date, whole.range()));
        }
    }

    for caps in DMY_RE.captures_iter(message) {
        let whole = caps.get(0)?;
        let day = parse_num(&caps, 1)? as u32;
        let month = parse_num(&caps, 2)? as u32;
        let year = pivot_year(parse_num(&caps, 3)?);
        if let Some(date) = ymd(year, month, day) {
            candidates.push((whole.start(), 2, date, whole.range()));
        }
    }

    for caps in DAY_MONTH_RE.captures_iter(message) {
        let whole = caps.get(0)?;
        let day = parse_num(&caps, 1)? as u32;
        let month = month_number(caps.get(2)?.as_str())?;
        let date = match caps.get(3) {
            Some(year) => ymd(year.as_str().parse().ok()?, month, day),
            None => future_ymd(today, month, day),
        };
        if let Some(date) = date {
            candidates.push((whole.start(), 3, date, whole.range()));
        }
    }

    for caps in MONTH_DAY_RE.captures_iter(message) {
        let whole = caps.get(0)?;
        let month = month_number(caps.get(1)?.as_str())?;
        let day = parse_num(&caps, 2)? as u32;
        let date = match caps.get(3) {
            Some(year) => ymd(year.as_str().parse().ok()?, month, day),
            None => future_ymd(today, month, day),
        };
        if let Some(date) = date {
            candidates.push((whole.start(), 4, date, whole.range()));
        }
    }

    for m in TODAY_RE.find_iter(message) {
        candidates.push((m.start(), 5, today, m.range()));
    }
    for m in TOMORROW_RE.find_iter(message) {
        if let Some(date) = today.checked_add_days(Days::new(1)) {
            candidates.push((m.start(), 5, date, m.range()));
        }
    }

    for caps in WEEKDAY_RE.captures_iter(message) {
        let whole = caps.get(0)?;
        let target = weekday_number(caps.get(1)?.as_str())?;
        if let Some(date) = next_weekday(today, target) {
            candidates.push((whole.start(), 6, date, whole.range()));
        }
    }

    for caps in BARE_MONTH_RE.captures_iter(message) {
        let whole = caps.get(0)?;
        let month = month_number(caps.get(1)?.as_str())?;
        let year = if month < today.month() {
            today.year().checked_add(1)?
        } else {
            today.year()
        };
        if let Some(date) = ymd(year, month, 1) {
            candidates.push((whole.start(), 7, date, whole.range()));
        }
    }

    candidates
        .into_iter()
        .min_by_key(|(start, rank, _, _)| (*start, *rank))
        .map(|(_, _, date, range)| (date, range))
}

fn parse_num(caps: &regex::Captures<'_>, group: usize) -> Option<i32> {
    caps.get(group)?.as_str().parse().ok()
}

fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Two-digit years pivot the same way strptime's `%y` does.
fn pivot_year(year: i32) -> i32 {
    if year >= 100 {
        year
    } else if year >= 70 {
        1900 + year
    } else {
        2000 + year
    }
}

/// Next occurrence of `month`/`day` on or after `today`.
fn future_ymd(today: NaiveDate, month: u32, day: u32) -> Option<NaiveDate> {
    for offset in 0..=4 {
        if let Some(date) = ymd(today.year() + offset, month, day) {
            if date >= today {
                return Some(date);
            }
        }
    }
    None
}

fn next_weekday(today: NaiveDate, target: Weekday) -> Option<NaiveDate> {
    let current = today.weekday().num_days_from_monday();
    let wanted = target.num_days_from_monday();
    let mut ahead = (wanted + 7 - current) % 7;
    if ahead == 0 {
        ahead = 7;
    }
    today.checked_add_days(Days::new(u64::from(ahead)))
}

fn month_number(name: &str) -> Option<u32> {
    let name = name.to_lowercase();
    let month = match name.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn weekday_number(name: &str) -> Option<Weekday> {
    let day = match name.to_lowercase().as_str() {
        "monday" => Weekday::Mon,
        "tuesday" => Weekday::Tue,
        "wednesday" => Weekday::Wed,
        "thursday" => Weekday::Thu,
        "friday" => Weekday::Fri,
        "saturday" => Weekday::Sat,
        "sunday" => Weekday::Sun,
        _ => return None,
    };
    Some(day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // 2024-06-03 is a Monday.
    fn today() -> NaiveDate {
        date(2024, 6, 3)
    }

    #[test]
    fn test_dotted_numeric_date_is_day_first() {
        let (found, span) = search_date("anything on 20.07.2024?", today()).unwrap();
        assert_eq!(found, date(2024, 7, 20));
        assert_eq!(span, 12..22);
    }

    #[test]
    fn test_slash_and_dash_separators() {
        let (found, _) = search_date("on 03/07/2024", today()).unwrap();
        assert_eq!(found, date(2024, 7, 3));

        let (found, _) = search_date("on 03-07-2024", today()).unwrap();
        assert_eq!(found, date(2024, 7, 3));
    }

    #[test]
    fn test_iso_date() {
        let (found, _) = search_date("on 2024-07-03 maybe", today()).unwrap();
        assert_eq!(found, date(2024, 7, 3));
    }

    #[test]
    fn test_two_digit_year_pivot() {
        let (found, _) = search_date("on 15/07/24", today()).unwrap();
        assert_eq!(found, date(2024, 7, 15));
    }

    #[test]
    fn test_day_before_month_name() {
        let (found, _) = search_date("events on 15th of July", today()).unwrap();
        assert_eq!(found, date(2024, 7, 15));
    }

    #[test]
    fn test_month_name_before_day_with_year() {
        let (found, _) = search_date("July 15, 2025 works for me", today()).unwrap();
        assert_eq!(found, date(2025, 7, 15));
    }

    #[test]
    fn test_yearless_date_prefers_the_future() {
        // March has already passed relative to June 2024.
        let (found, _) = search_date("on 10 March", today()).unwrap();
        assert_eq!(found, date(2025, 3, 10));
    }

    #[test]
    fn test_explicit_past_year_is_kept() {
        let (found, _) = search_date("back on 10 March 2020", today()).unwrap();
        assert_eq!(found, date(2020, 3, 10));
    }

    #[test]
    fn test_today_and_tomorrow() {
        let (found, _) = search_date("what about today", today()).unwrap();
        assert_eq!(found, today());

        let (found, _) = search_date("and tomorrow?", today()).unwrap();
        assert_eq!(found, date(2024, 6, 4));
    }

    #[test]
    fn test_weekday_is_strictly_future() {
        // Friday after Monday 2024-06-03.
        let (found, _) = search_date("free on friday?", today()).unwrap();
        assert_eq!(found, date(2024, 6, 7));

        // Naming the current weekday means the one a week out.
        let (found, _) = search_date("on monday", today()).unwrap();
        assert_eq!(found, date(2024, 6, 10));
    }

    #[test]
    fn test_bare_month_name() {
        let (found, span) = search_date("concerts in September", today()).unwrap();
        assert_eq!(found, date(2024, 9, 1));
        assert_eq!(&"concerts in September"[span], "September");
    }

    #[test]
    fn test_bare_month_in_the_past_rolls_over() {
        let (found, _) = search_date("concerts in February", today()).unwrap();
        assert_eq!(found, date(2025, 2, 1));
    }

    #[test]
    fn test_first_date_in_the_message_wins() {
        let (found, _) = search_date("tomorrow or on 20.07.2024?", today()).unwrap();
        assert_eq!(found, date(2024, 6, 4));
    }

    #[test]
    fn test_month_day_beats_bare_month_at_same_start() {
        let (found, _) = search_date("during July 15", today()).unwrap();
        assert_eq!(found, date(2024, 7, 15));
    }

    #[test]
    fn test_invalid_calendar_dates_are_skipped() {
        assert!(search_date("on 32.13.2024", today()).is_none());
    }

    #[test]
    fn test_plain_numbers_are_not_dates() {
        assert!(search_date("show me 20 events", today()).is_none());
        assert!(search_date("under 20 BAM", today()).is_none());
    }
}
