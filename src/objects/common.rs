//! Common helpers shared across audit objects.
//!
//! This module contains the timestamp handling used throughout the crate:
//! Redline audit exports encode file times as RFC 3339 text with a UTC
//! offset, and body file output wants them as integer Unix epoch seconds.

use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset};

/// XML element name that delimits one audit entry.
pub const FILE_ITEM_TAG: &str = "FileItem";

/// Parses an RFC 3339 timestamp string from an audit export.
///
/// Redline writes offset-aware timestamps such as
/// `2023-08-29T10:15:00-04:00` or `2023-01-01T00:00:00Z`. Anything that
/// does not parse as RFC 3339 is rejected.
///
/// # Example
///
/// ```rust
/// use redline_bodyfile::objects::parse_timestamp;
///
/// let dt = parse_timestamp("2023-01-01T00:00:00Z").unwrap();
/// assert_eq!(dt.timestamp(), 1672531200);
/// ```
pub fn parse_timestamp(s: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s)
        .map_err(|_| Error::InvalidTimestamp(format!("Cannot parse timestamp: {}", s)))
}

/// Converts an audit timestamp string to Unix epoch seconds.
pub fn epoch_seconds(s: &str) -> Result<i64> {
    Ok(parse_timestamp(s)?.timestamp())
}
