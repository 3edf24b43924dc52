use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::errors::{Result, ValidationError};
use crate::Error;

/// Normalizes a remote timestamp to a naive UTC instant.
///
/// Accepted forms:
/// - RFC 3339 with `Z` or any numeric offset (converted to UTC)
/// - naive `YYYY-MM-DDTHH:MM:SS[.f]` or with a space separator, taken as UTC
/// - date-only `YYYY-MM-DD`, taken as midnight UTC
pub fn parse_remote_datetime(raw: &str) -> Result<NaiveDateTime> {
    let value = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc).naive_utc());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt);
        }
    }

    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => Ok(date.and_hms_opt(0, 0, 0).unwrap_or_default()),
        Err(e) => Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Unrecognized date '{}': {}",
            raw, e
        )))),
    }
}

/// Same as [`parse_remote_datetime`], with a missing date meaning "now".
pub fn parse_remote_datetime_or_now(raw: Option<&str>) -> Result<NaiveDateTime> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => parse_remote_datetime(value),
        None => Ok(Utc::now().naive_utc()),
    }
}
