use ladder_core::config::RankCriteria;
use ladder_core::constants::CONTRARIAN_BONUS_CAP;

/// Accuracy score with contrarian bonus and threshold rescaling.
///
/// 0 until `resolved_count` reaches the tier's resolved floor, no matter how
/// high the raw accuracy is. Above the floor, raw accuracy (0–100) gets a
/// bonus of `min(10, contrarian_wins / max(1, resolved) * 10)`; a boosted
/// value below the tier's accuracy floor scores 0, otherwise it is rescaled
/// to `((boosted - min) / (100 - min)) * 100` and capped at 100.
///
/// Range: 0.0 – 100.0.
pub fn calculate(
    raw_accuracy: f64,
    resolved_count: u64,
    contrarian_wins: u64,
    criteria: &RankCriteria,
) -> f64 {
    if resolved_count < criteria.min_resolved_predictions {
        return 0.0;
    }

    let bonus =
        (contrarian_wins as f64 / resolved_count.max(1) as f64 * 10.0).min(CONTRARIAN_BONUS_CAP);
    let boosted = raw_accuracy + bonus;

    let min = criteria.min_accuracy;
    if boosted < min {
        return 0.0;
    }
    if min >= 100.0 {
        // Degenerate floor: anything that reached it is a full score.
        return 100.0;
    }

    ((boosted - min) / (100.0 - min) * 100.0).min(100.0)
}
