//! GMT-normalized timestamps for NATS-style wire messages.
//!
//! Servers exchange timestamps as RFC 3339 text with nanosecond precision and
//! a literal trailing `Z`. This crate keeps every timestamp in that shape: all
//! values are normalized to GMT at the boundary, formatting always emits nine
//! fractional digits, and lenient parsing substitutes a caller-supplied
//! default instead of failing.
//!
//! # Example
//!
//! ```
//! use nats_datetime::{parse_date_time_or_default, to_rfc3339};
//!
//! let dt = parse_date_time_or_default("2021-01-20T23:41:08.579594Z");
//! assert_eq!(dt.timestamp(), 1611186068);
//! assert_eq!(to_rfc3339(&dt), "2021-01-20T23:41:08.579594000Z");
//! ```

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use thiserror::Error;

/// RFC 3339 layout used for all emitted timestamps: nine fractional digits,
/// literal `Z`.
const RFC3339_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.%fZ";

/// Epoch seconds of 0001-01-01T00:00:00Z, the "unset" sentinel instant.
const DEFAULT_TIME_EPOCH_SECONDS: i64 = -62_135_596_800;

/// The sentinel instant used instead of a missing timestamp:
/// 0001-01-01T00:00:00Z.
///
/// Fields holding this value are treated as unset and omitted from output.
pub fn default_time() -> DateTime<Utc> {
    DateTime::from_timestamp(DEFAULT_TIME_EPOCH_SECONDS, 0).unwrap_or_default()
}

/// Re-express a timestamp in GMT, same instant.
pub fn to_gmt<Tz: TimeZone>(dt: &DateTime<Tz>) -> DateTime<Utc> {
    dt.with_timezone(&Utc)
}

/// The current instant, expressed in GMT.
pub fn gmt_now() -> DateTime<Utc> {
    Utc::now()
}

/// An instant `dur` from now, expressed in GMT.
pub fn from_now(dur: Duration) -> DateTime<Utc> {
    gmt_now() + dur
}

/// An instant `millis` milliseconds from now, expressed in GMT.
pub fn from_now_millis(millis: i64) -> DateTime<Utc> {
    gmt_now() + chrono::Duration::milliseconds(millis)
}

/// Instant equality after independently normalizing both operands to GMT.
///
/// `None` compares equal only to `None`.
///
/// # Example
///
/// ```
/// use chrono::DateTime;
/// use nats_datetime::equals;
///
/// let utc = DateTime::parse_from_rfc3339("2021-02-02T19:18:28Z").unwrap();
/// let pst = DateTime::parse_from_rfc3339("2021-02-02T11:18:28-08:00").unwrap();
/// assert!(equals(Some(&utc), Some(&pst)));
/// assert!(!equals(Some(&utc), None::<&DateTime<chrono::Utc>>));
/// ```
pub fn equals<Tz1: TimeZone, Tz2: TimeZone>(
    dt1: Option<&DateTime<Tz1>>,
    dt2: Option<&DateTime<Tz2>>,
) -> bool {
    match (dt1, dt2) {
        (Some(dt1), Some(dt2)) => to_gmt(dt1) == to_gmt(dt2),
        (None, None) => true,
        _ => false,
    }
}

/// Format a timestamp as RFC 3339 after GMT normalization:
/// `yyyy-MM-ddTHH:mm:ss.nnnnnnnnnZ`.
pub fn to_rfc3339<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    to_gmt(dt).format(RFC3339_FORMAT).to_string()
}

/// Parse an RFC 3339 date-time and normalize it to GMT; on any parse failure
/// return `dflt` instead.
pub fn parse_date_time(text: &str, dflt: DateTime<Utc>) -> DateTime<Utc> {
    match DateTime::parse_from_rfc3339(text) {
        Ok(dt) => to_gmt(&dt),
        Err(_) => dflt,
    }
}

/// Parse an RFC 3339 date-time and normalize it to GMT; on any parse failure
/// return [`default_time`].
pub fn parse_date_time_or_default(text: &str) -> DateTime<Utc> {
    parse_date_time(text, default_time())
}

/// Parse an RFC 3339 date-time and normalize it to GMT, propagating the parse
/// failure to the caller.
///
/// # Errors
///
/// Returns [`DateTimeError::Parse`] when the text is not a valid RFC 3339
/// date-time.
pub fn parse_date_time_or_fail(text: &str) -> Result<DateTime<Utc>, DateTimeError> {
    let dt = DateTime::parse_from_rfc3339(text)?;
    Ok(to_gmt(&dt))
}

/// Error type for date-time parsing operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateTimeError {
    #[error("invalid date-time text: {0}")]
    Parse(#[from] chrono::ParseError),
}
