//! Date and time utilities

use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Timelike};

/// Storage and listing format for show times
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const FULL_PATTERN: &str = "%A %B, %-d, %Y at %-I:%M%p";
const MEDIUM_PATTERN: &str = "%a %m, %d, %Y %-I:%M%p";

/// Display pattern selected by the `datetime` filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFormat {
    /// "Tuesday October, 20, 2026 at 9:00PM"
    #[default]
    Full,
    /// "Tue 10, 20, 2026 9:00PM"
    Medium,
}

impl DateFormat {
    fn pattern(self) -> &'static str {
        match self {
            DateFormat::Full => FULL_PATTERN,
            DateFormat::Medium => MEDIUM_PATTERN,
        }
    }
}

impl FromStr for DateFormat {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(DateFormat::Full),
            "medium" => Ok(DateFormat::Medium),
            other => Err(DateError::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("unrecognised date/time value: {0:?}")]
    Unparseable(String),
    #[error("unknown date format: {0:?}")]
    UnknownFormat(String),
}

/// Current local time, truncated to whole seconds so it compares cleanly
/// against stored values.
pub fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Parse a date/time string in any of the shapes forms and the database produce
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime, DateError> {
    let value = value.trim();

    const PATTERNS: [&str; 5] = [
        DATETIME_FORMAT,
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
    ];

    for pattern in PATTERNS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, pattern) {
            return Ok(dt);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Local).naive_local());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| DateError::Unparseable(value.to_string()))
}

/// Render a timestamp in the storage/listing format
pub fn to_db_string(dt: &NaiveDateTime) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}

/// The `datetime` display filter
pub fn format_datetime(value: &str, format: DateFormat) -> Result<String, DateError> {
    let dt = parse_datetime(value)?;
    Ok(render(&dt, format))
}

/// Render an already parsed timestamp with a display pattern
pub fn render(dt: &NaiveDateTime, format: DateFormat) -> String {
    dt.format(format.pattern()).to_string()
}
