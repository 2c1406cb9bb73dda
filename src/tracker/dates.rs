use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use std::fmt;

/// Storage format; lexical order matches calendar order for four-digit years.
const STORAGE_FORMAT: &str = "%Y-%m-%d";

/// `Mon May 01 2023`
const DISPLAY_FORMAT: &str = "%a %b %d %Y";

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%a %b %d %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// A calendar date as logged by a client. Unparseable input is kept as
/// `Invalid` rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDate {
    Valid(NaiveDate),
    Invalid,
}

impl LogDate {
    pub fn today() -> Self {
        LogDate::Valid(Local::now().date_naive())
    }

    pub fn parse(input: &str) -> Self {
        parse_calendar_date(input).map_or(LogDate::Invalid, LogDate::Valid)
    }

    /// `None` encodes the invalid sentinel in the `date` column.
    pub fn to_storage(self) -> Option<String> {
        match self {
            LogDate::Valid(date) => Some(date.format(STORAGE_FORMAT).to_string()),
            LogDate::Invalid => None,
        }
    }

    pub fn from_storage(stored: Option<&str>) -> Self {
        stored
            .and_then(|s| NaiveDate::parse_from_str(s, STORAGE_FORMAT).ok())
            .map_or(LogDate::Invalid, LogDate::Valid)
    }

    pub fn is_valid(self) -> bool {
        matches!(self, LogDate::Valid(_))
    }
}

impl fmt::Display for LogDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogDate::Valid(date) => write!(f, "{}", date.format(DISPLAY_FORMAT)),
            LogDate::Invalid => f.write_str("Invalid Date"),
        }
    }
}

fn parse_calendar_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    // Timestamps with an offset keep the calendar date as written.
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.date_naive());
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Leading-integer parse: optional sign then digits, trailing text ignored.
/// `"30"` and `"30 min"` give 30, `"3.9"` gives 3, `"abc"` gives `None`.
/// A digit run that overflows `i64` is treated as unparseable.
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}
