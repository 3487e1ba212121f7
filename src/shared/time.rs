//! Canonical date / time-of-day normalization.
//!
//! Wire format is `YYYY-MM-DD` for dates and `HH:MM` or `HH:MM:SS` for
//! times. Values are parsed once at the API boundary and travel as chrono
//! types from there on.

use chrono::{NaiveDate, NaiveTime};

use super::errors::{DomainError, DomainResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";
const SHORT_TIME_FORMAT: &str = "%H:%M";

pub fn parse_date(field: &str, raw: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        DomainError::InvalidInput(format!("{field} must be a date in YYYY-MM-DD format, got '{raw}'"))
    })
}

pub fn parse_time(field: &str, raw: &str) -> DomainResult<NaiveTime> {
    let raw_trimmed = raw.trim();
    NaiveTime::parse_from_str(raw_trimmed, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(raw_trimmed, SHORT_TIME_FORMAT))
        .map_err(|_| {
            DomainError::InvalidInput(format!("{field} must be a time in HH:MM or HH:MM:SS format, got '{raw}'"))
        })
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// A shift window must start strictly before it ends.
pub fn ensure_window(start: NaiveTime, end: NaiveTime) -> DomainResult<()> {
    if start >= end {
        return Err(DomainError::InvalidInput(format!(
            "start_time ({}) must be before end_time ({})",
            format_time(start),
            format_time(end)
        )));
    }
    Ok(())
}
