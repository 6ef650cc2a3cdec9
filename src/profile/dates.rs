//! Date and date-time grammars recognized by the classifier
//!
//! The primary grammar is ISO-8601-like (`2024-03-01`, `2024-03-01T08:30`,
//! `2024-03-01 08:30:15.250+01:00`). A short list of fixed alternate patterns
//! covers the other layouts common in transport files.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;

static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d{4})-(\d{2})-(\d{2})(?:[T ](\d{2}):(\d{2})(?::(\d{2})(?:[.,](\d{1,9}))?)?(?:Z|[+-]\d{2}(?::?\d{2})?)?)?$",
    )
    .expect("ISO date pattern is valid")
});

/// Alternate date-only patterns
const DATE_PATTERNS: &[&str] = &["%d%b%Y", "%d-%b-%Y", "%m/%d/%Y", "%Y/%m/%d"];

/// Alternate date-time patterns
const DATETIME_PATTERNS: &[&str] = &[
    "%d%b%Y:%H:%M:%S",
    "%d%b%Y:%H:%M",
    "%d-%b-%Y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// A successfully parsed date value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDate {
    pub value: NaiveDateTime,
    /// The text carried a time-of-day component
    pub has_time: bool,
}

/// Parse `text` under any recognized grammar
///
/// Offsets in ISO values are accepted but ignored; the wall-clock time is kept.
pub fn parse_date(text: &str) -> Option<ParsedDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    parse_iso(text).or_else(|| parse_alternate(text))
}

fn parse_iso(text: &str) -> Option<ParsedDate> {
    let caps = ISO_DATE.captures(text)?;
    let num = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());

    let date = NaiveDate::from_ymd_opt(caps[1].parse().ok()?, num(2)?, num(3)?)?;

    let Some(hour) = num(4) else {
        return Some(ParsedDate {
            value: date.and_time(NaiveTime::MIN),
            has_time: false,
        });
    };

    let nanos = match caps.get(7) {
        Some(m) => {
            let digits = m.as_str();
            digits.parse::<u32>().ok()? * 10u32.pow(9 - digits.len() as u32)
        }
        None => 0,
    };
    let time = NaiveTime::from_hms_nano_opt(hour, num(5)?, num(6).unwrap_or(0), nanos)?;

    Some(ParsedDate {
        value: date.and_time(time),
        has_time: true,
    })
}

fn parse_alternate(text: &str) -> Option<ParsedDate> {
    DATETIME_PATTERNS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|value| ParsedDate {
            value,
            has_time: true,
        })
        .or_else(|| {
            DATE_PATTERNS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .map(|date| ParsedDate {
                    value: date.and_time(NaiveTime::MIN),
                    has_time: false,
                })
        })
}
