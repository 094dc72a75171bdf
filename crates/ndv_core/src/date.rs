//! Date normalization.
//!
//! Publication dates come from several crawlers and are not consistent. They
//! are reduced to a canonical `YYYY-MM-DD` string that sorts lexicographically
//! in calendar order, or to the empty string when nothing usable is found.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use lazy_static::lazy_static;
use regex::Regex;

/// Sentinel for an unknown publication date. Sorts after every real date.
pub const UNKNOWN_DATE: &str = "";

/// Shown wherever a date cannot be normalized.
pub const UNKNOWN_DATE_LABEL: &str = "Unknown date";

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%a %b %d %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

lazy_static! {
    static ref YEAR_FIRST: Regex = Regex::new(r"(\d{4})[/-](\d{1,2})[/-](\d{1,2})").unwrap();
    static ref DAY_FIRST: Regex = Regex::new(r"(\d{1,2})[/-](\d{1,2})[/-](\d{4})").unwrap();
    static ref YEAR_ONLY: Regex = Regex::new(r"^\d{4}$").unwrap();
    static ref YEAR_MONTH: Regex = Regex::new(r"^\d{4}-\d{2}$").unwrap();
}

/// Reduce `raw` to `YYYY-MM-DD`, or [`UNKNOWN_DATE`] when it cannot be read.
///
/// Calendar parsing is tried first. When it fails, the year-first shape
/// `YYYY[-/]M[-/]D` and then the day-first shape `D[-/]M[-/]YYYY` are searched
/// anywhere in the string; their components are only zero padded, not
/// range checked. The result of a successful call normalizes to itself.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return UNKNOWN_DATE.to_string();
    }

    if let Some(date) = parse_calendar_date(trimmed) {
        return date.format("%Y-%m-%d").to_string();
    }

    if let Some(caps) = YEAR_FIRST.captures(trimmed) {
        return format!("{}-{:0>2}-{:0>2}", &caps[1], &caps[2], &caps[3]);
    }

    if let Some(caps) = DAY_FIRST.captures(trimmed) {
        return format!("{}-{:0>2}-{:0>2}", &caps[3], &caps[2], &caps[1]);
    }

    tracing::trace!(raw = trimmed, "unparseable date");
    UNKNOWN_DATE.to_string()
}

/// Render `raw` as `YYYY/MM/DD` for a date header or card.
///
/// Anything that does not normalize, empty or malformed alike, renders as
/// [`UNKNOWN_DATE_LABEL`].
pub fn format_for_display(raw: &str) -> String {
    let normalized = normalize(raw);
    if normalized.is_empty() {
        return UNKNOWN_DATE_LABEL.to_string();
    }
    normalized.replace('-', "/")
}

/// Parse a recency timestamp such as `updatedAt`.
///
/// Full timestamps keep their time of day; anything that only normalizes to
/// a calendar date is placed at midnight UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    let normalized = normalize(trimmed);
    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.date());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }
    if YEAR_ONLY.is_match(s) {
        return s.parse::<i32>().ok().and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1));
    }
    if YEAR_MONTH.is_match(s) {
        return NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d").ok();
    }
    None
}
