use anyhow::{bail, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;

/// Wire format for dates sent to the booking service.
pub const API_DATE_FORMAT: &str = "%Y-%m-%d";

/// Normalize a date selection to the calendar day the user picked.
///
/// Accepts a plain date, a local date-time without offset, or an RFC 3339
/// instant. Instants are converted to `tz` before the date is taken, so
/// midnight in the user's zone never slips to the previous UTC day.
pub fn parse_selection(input: &str, tz: Tz) -> Result<NaiveDate> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, API_DATE_FORMAT) {
        return Ok(date);
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
        return Ok(instant.with_timezone(&tz).date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(local) = NaiveDateTime::parse_from_str(input, fmt) {
            return Ok(local.date());
        }
    }
    bail!("Cannot parse date '{}' (expected YYYY-MM-DD)", input)
}

pub fn api_date(date: NaiveDate) -> String {
    date.format(API_DATE_FORMAT).to_string()
}
