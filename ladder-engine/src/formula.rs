use chrono::{DateTime, Utc};

use ladder_core::config::TierConfig;
use ladder_core::models::{ScoreBreakdown, UserStats};

use crate::factors;

/// Weighted-sum scoring formula.
///
/// ```text
/// percentage = timeScore        × timeWeight
///            + accuracyScore    × accuracyWeight
///            + consistencyScore × consistencyWeight
///            + volumeScore      × volumeWeight
///            − inactivityPenalty
/// ```
///
/// Result is clamped to [0.0, 100.0].
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedScore {
    pub percentage: f64,
    pub breakdown: ScoreBreakdown,
    pub inactivity_penalty: f64,
}

/// Compute the progress score for one user under their current tier's
/// configuration. `next_gate_days` is the account-age gate of the tier
/// above, `None` at the terminal tier.
pub fn compute(
    stats: &UserStats,
    current: &TierConfig,
    next_gate_days: Option<i64>,
    now: DateTime<Utc>,
) -> WeightedScore {
    let criteria = &current.criteria;
    let age = stats.account_age_days(now);

    let time = factors::time::calculate(age, next_gate_days);
    let accuracy = factors::accuracy::calculate(
        stats.accuracy,
        stats.resolved_count,
        stats.contrarian_wins,
        criteria,
    );
    let consistency = factors::consistency::calculate(stats.weekly_activity, criteria.min_active_weeks);
    let volume = factors::volume::calculate(stats.predictions_count, criteria.min_predictions);

    let weighted = time * criteria.time_weight
        + accuracy * criteria.accuracy_weight
        + consistency * criteria.consistency_weight
        + volume * criteria.volume_weight;

    let penalty = factors::inactivity::penalty(stats.inactivity_streaks);

    // The penalty can push below zero; clamp both ends.
    let percentage = (weighted - penalty).clamp(0.0, 100.0);

    WeightedScore {
        percentage,
        breakdown: ScoreBreakdown {
            time,
            accuracy,
            consistency,
            volume,
        },
        inactivity_penalty: penalty,
    }
}
