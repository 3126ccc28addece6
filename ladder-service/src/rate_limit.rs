//! Per-user recalculation rate limit, tracked via the last-recalculation
//! timestamp on the user record itself (no separate limiter state).

use chrono::{DateTime, Duration, Utc};

/// Check whether a non-forced recalculation may run.
///
/// `Err` carries the next-allowed time. A user who has never been
/// recalculated is always allowed.
pub fn check(
    last_recalculated_at: Option<DateTime<Utc>>,
    interval: Duration,
    now: DateTime<Utc>,
) -> Result<(), DateTime<Utc>> {
    match last_recalculated_at {
        Some(last) if now - last < interval => Err(last + interval),
        _ => Ok(()),
    }
}
