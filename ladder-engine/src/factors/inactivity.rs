use ladder_core::constants::{INACTIVITY_PENALTY_PER_STREAK, MAX_INACTIVITY_PENALTY};

/// Inactivity penalty: 10 points per streak, hard-capped at 50.
///
/// Range: 0.0 – 50.0.
pub fn penalty(inactivity_streaks: u64) -> f64 {
    (inactivity_streaks as f64 * INACTIVITY_PENALTY_PER_STREAK).min(MAX_INACTIVITY_PENALTY)
}
