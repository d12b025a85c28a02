//! Utility functions for the queue client

use chrono::{DateTime, NaiveDateTime, Utc};

/// Naive layouts the backend is known to emit (Postgres text output and
/// ISO-8601 without offset). Naive values are read as UTC.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an enqueue timestamp.
///
/// Accepts RFC 3339 (any offset, normalised to UTC), Postgres text output and
/// naive ISO-8601. Returns `None` when nothing matches.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    // Postgres renders offsets as "+00" which RFC 3339 rejects
    if let Ok(ts) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(ts.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}
