//! Calendar date conversions for the close-approach dataset.
//!
//! JPL's close-approach table writes timestamps like `1900-Jan-01 00:00`
//! (UTC, minute precision). The canonical form used for display and
//! serialization is `1900-01-01 00:00` — never with a seconds component,
//! since the source data carries none.

use chrono::NaiveDateTime;

/// Timestamp format of the raw close-approach data.
pub const SOURCE_TIME_FORMAT: &str = "%Y-%b-%d %H:%M";

/// Canonical minute-precision format for display and serialization.
pub const CANONICAL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Placeholder emitted for approaches whose timestamp is absent.
pub const UNKNOWN_TIME: &str = "unknown";

/// Parse a timestamp in the dataset's `%Y-%b-%d %H:%M` form.
pub fn parse_approach_time(raw: &str) -> chrono::ParseResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), SOURCE_TIME_FORMAT)
}

/// Format a timestamp in the canonical `%Y-%m-%d %H:%M` form.
///
/// An absent timestamp yields the deterministic [`UNKNOWN_TIME`]
/// placeholder so serialized rows stay well-formed.
pub fn format_approach_time(time: Option<NaiveDateTime>) -> String {
    match time {
        Some(time) => time.format(CANONICAL_TIME_FORMAT).to_string(),
        None => UNKNOWN_TIME.to_string(),
    }
}
