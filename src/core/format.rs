//! # Display Formatting
//!
//! Pure helpers for rendering timestamps and numeric fields. Invalid
//! input never escapes as an error: the date formatter degrades to an
//! empty string, the number formatter renders exactly what the float
//! formatter renders.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, Timelike, Utc};

/// Default pattern for [`format_date_time`].
pub const DEFAULT_DATETIME_PATTERN: &str = "YYYY-MM-DD HH:mm";

/// Default digit count for [`format_number`].
pub const DEFAULT_NUMBER_DIGITS: usize = 2;

/// Input accepted by [`format_date_time`]: raw text, a naive local
/// timestamp, or an already zoned chrono value.
#[derive(Debug, Clone)]
pub enum DateTimeValue {
    Text(String),
    Naive(NaiveDateTime),
    Zoned(DateTime<Local>),
}

impl From<&str> for DateTimeValue {
    fn from(s: &str) -> Self {
        DateTimeValue::Text(s.to_string())
    }
}

impl From<String> for DateTimeValue {
    fn from(s: String) -> Self {
        DateTimeValue::Text(s)
    }
}

impl From<NaiveDateTime> for DateTimeValue {
    fn from(naive: NaiveDateTime) -> Self {
        DateTimeValue::Naive(naive)
    }
}

impl From<DateTime<Local>> for DateTimeValue {
    fn from(dt: DateTime<Local>) -> Self {
        DateTimeValue::Zoned(dt)
    }
}

impl From<DateTime<Utc>> for DateTimeValue {
    fn from(dt: DateTime<Utc>) -> Self {
        DateTimeValue::Zoned(dt.with_timezone(&Local))
    }
}

/// Renders a date/time as text by substituting `YYYY` `MM` `DD` `HH`
/// `mm` `ss` tokens in `pattern` with zero-padded local calendar and
/// clock fields.
///
/// Absent, empty and unparseable inputs all come back as `""` so a
/// missing timestamp renders as a blank cell rather than an error.
/// Only the first occurrence of each token is substituted.
pub fn format_date_time<V: Into<DateTimeValue>>(value: Option<V>, pattern: &str) -> String {
    let Some(value) = value else {
        return String::new();
    };
    match coerce(value.into()) {
        Some(dt) => substitute(pattern, &dt),
        None => String::new(),
    }
}

/// Renders a number with exactly `digits` fractional digits, using the
/// standard float formatter's rounding. `None` comes back as `""`.
pub fn format_number(value: Option<f64>, digits: usize) -> String {
    match value {
        Some(n) => format!("{n:.digits$}"),
        None => String::new(),
    }
}

fn coerce(value: DateTimeValue) -> Option<DateTime<Local>> {
    match value {
        DateTimeValue::Zoned(dt) => Some(dt),
        DateTimeValue::Naive(naive) => naive.and_local_timezone(Local).earliest(),
        DateTimeValue::Text(s) => parse_text(s.trim()),
    }
}

/// Text coercion: RFC 3339 first (converted to local time), then the
/// naive date-time and date shapes the backend and users actually
/// produce, interpreted as local time.
fn parse_text(s: &str) -> Option<DateTime<Local>> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }
    const NAIVE_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return naive.and_local_timezone(Local).earliest();
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .and_then(|naive| naive.and_local_timezone(Local).earliest())
}

// First occurrence of each token only.
fn substitute(pattern: &str, dt: &DateTime<Local>) -> String {
    pattern
        .replacen("YYYY", &format!("{:04}", dt.year()), 1)
        .replacen("MM", &format!("{:02}", dt.month()), 1)
        .replacen("DD", &format!("{:02}", dt.day()), 1)
        .replacen("HH", &format!("{:02}", dt.hour()), 1)
        .replacen("mm", &format!("{:02}", dt.minute()), 1)
        .replacen("ss", &format!("{:02}", dt.second()), 1)
}
