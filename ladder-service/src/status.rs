//! Progress-rate extrapolation for the status projection.

/// Estimate whole days until the percentage reaches 100 at the observed
/// percentage-per-day rate in the current tier.
///
/// `None` when the rate is non-positive (no progress yet, or day zero in
/// the tier). Already-complete progress estimates as zero days.
pub fn estimated_days_to_next_tier(percentage: f64, days_in_tier: i64) -> Option<i64> {
    if percentage >= 100.0 {
        return Some(0);
    }
    if days_in_tier <= 0 || percentage <= 0.0 {
        return None;
    }

    let rate = percentage / days_in_tier as f64;
    Some(((100.0 - percentage) / rate).ceil() as i64)
}
