//! Price mention scanning and price normalization.
//!
//! A price mention is an amount followed by the catalog currency code
//! ("20 BAM"). The word right before the amount decides how the mention
//! constrains matching: "under 20 BAM" caps the price, "over 20 BAM" sets a
//! floor, a bare "20 BAM" must match exactly. Normalization reduces any raw
//! price string to its numeric magnitude; strings without a number normalize
//! to `None` and are rendered as the `"N/A"` sentinel, which never satisfies
//! a mention.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{MarqueeError, Result};

/// How a price mention constrains the event price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceQualifier {
    /// Bare amount, matched by canonical-string equality.
    Exact,
    /// "under", "below", "up to", "at most".
    AtMost,
    /// "over", "above", "at least".
    AtLeast,
}

/// A price mention extracted from a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceMention {
    /// Numeric magnitude of the mention.
    pub amount: f64,
    /// Bound direction parsed from the preceding words.
    pub qualifier: PriceQualifier,
}

impl PriceMention {
    /// Check whether a normalized event price satisfies this mention.
    pub fn accepts(&self, event_amount: f64) -> bool {
        match self.qualifier {
            PriceQualifier::Exact => {
                canonical_amount(event_amount) == canonical_amount(self.amount)
            }
            PriceQualifier::AtMost => event_amount <= self.amount,
            PriceQualifier::AtLeast => event_amount >= self.amount,
        }
    }
}

/// First number found in a raw price string, or `None`.
pub fn normalize_price(raw: &str) -> Option<f64> {
    static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(\.\d+)?").unwrap());

    NUMBER_RE
        .find(raw)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Canonical currency-suffixed rendering of a raw price string, with the
/// `"N/A"` sentinel for anything that carries no number.
pub fn canonical_price(raw: &str, unit: &str) -> String {
    match normalize_price(raw) {
        Some(amount) => format!("{} {unit}", canonical_amount(amount)),
        None => "N/A".to_string(),
    }
}

fn canonical_amount(amount: f64) -> String {
    // 15, 15.0 and "15 BAM" all canonicalize to the same magnitude string.
    format!("{amount}")
}

/// Words that, immediately before an amount, turn it into an upper bound.
const AT_MOST_WORDS: &[&str] = &["under", "below", "beneath", "within"];
/// Words that turn the amount into a lower bound.
const AT_LEAST_WORDS: &[&str] = &["over", "above", "exceeding"];
/// Two-word phrases checked against the last two preceding words.
const AT_MOST_PHRASES: &[(&str, &str)] = &[("up", "to"), ("at", "most")];
const AT_LEAST_PHRASES: &[(&str, &str)] = &[("at", "least"), ("more", "than")];
const AT_MOST_PHRASES_EXTRA: &[(&str, &str)] = &[("less", "than"), ("cheaper", "than")];

/// Scans messages for currency-suffixed amounts.
#[derive(Debug, Clone)]
pub struct PriceScanner {
    pattern: Regex,
}

impl PriceScanner {
    /// Build a scanner for the given currency code (matched
    /// case-insensitively as a whole word).
    pub fn new(unit: &str) -> Result<Self> {
        let pattern = format!(r"(?i)\b(\d+(?:\.\d+)?)\s*{}\b", regex::escape(unit));
        let pattern = Regex::new(&pattern)
            .map_err(|e| MarqueeError::invalid_config(format!("price pattern: {e}")))?;
        Ok(PriceScanner { pattern })
    }

    /// Find all price mentions in order of appearance, with their byte spans.
    pub fn scan(&self, message: &str) -> Vec<(PriceMention, Range<usize>)> {
        self.pattern
            .captures_iter(message)
            .filter_map(|caps| {
                let all = caps.get(0)?;
                let amount: f64 = caps.get(1)?.as_str().parse().ok()?;
                let qualifier = qualifier_before(message, all.start());
                Some((PriceMention { amount, qualifier }, all.range()))
            })
            .collect()
    }
}

/// Read the qualifier from the one or two words preceding the match.
fn qualifier_before(message: &str, match_start: usize) -> PriceQualifier {
    let mut preceding = message[..match_start]
        .split_whitespace()
        .rev()
        .map(str::to_lowercase);
    let last = preceding.next();
    let second_last = preceding.next();

    if let Some(last) = last {
        let last = last.trim_matches(|c: char| !c.is_alphanumeric()).to_string();
        if AT_MOST_WORDS.contains(&last.as_str()) {
            return PriceQualifier::AtMost;
        }
        if AT_LEAST_WORDS.contains(&last.as_str()) {
            return PriceQualifier::AtLeast;
        }
        if let Some(second) = second_last {
            let second = second
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_string();
            let pair = (second.as_str(), last.as_str());
            if AT_MOST_PHRASES.contains(&pair) || AT_MOST_PHRASES_EXTRA.contains(&pair) {
                return PriceQualifier::AtMost;
            }
            if AT_LEAST_PHRASES.contains(&pair) {
                return PriceQualifier::AtLeast;
            }
        }
    }

    PriceQualifier::Exact
}
