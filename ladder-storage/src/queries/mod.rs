//! Query modules, one per concern, operating on a borrowed connection.

pub mod history;
pub mod snapshots;
pub mod user_stats;

use chrono::{DateTime, SecondsFormat, Utc};

/// Fixed-width RFC 3339 (millisecond precision, Z suffix) so stored
/// timestamps compare correctly as text in SQL.
pub(crate) fn fmt_ts(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn parse_ts(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}
