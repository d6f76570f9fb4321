//! Time and timestamp helpers.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::ValidationError;

/// UTC timestamp used for reading times and period bounds.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Parse a timestamp given either as RFC 3339 (`2024-04-15T07:20:50Z`) or
/// as an ISO local date-time without offset (`2024-04-15T07:20:50`), the
/// latter being read as UTC.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTimestamp`] when neither form matches.
pub fn parse_timestamp(value: &str) -> Result<Timestamp, ValidationError> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| ValidationError::InvalidTimestamp(value.to_owned()))
}
