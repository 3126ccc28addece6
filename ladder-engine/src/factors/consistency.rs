/// Consistency score from weekly activity.
///
/// 100 when activity reaches 1.5× the tier's active-week floor, 85 at the
/// floor, linear up to 85 below it. A floor of zero scores 100 outright.
///
/// Range: 0.0 – 100.0.
pub fn calculate(weekly_activity: u64, min_active_weeks: u64) -> f64 {
    if min_active_weeks == 0 {
        return 100.0;
    }

    let weeks = weekly_activity as f64;
    let floor = min_active_weeks as f64;

    if weeks >= floor * 1.5 {
        100.0
    } else if weeks >= floor {
        85.0
    } else {
        weeks / floor * 85.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_floor_scores_full() {
        assert_eq!(calculate(0, 0), 100.0);
    }

    #[test]
    fn one_and_a_half_times_floor_scores_full() {
        assert_eq!(calculate(6, 4), 100.0);
    }

    #[test]
    fn at_floor_scores_eighty_five() {
        assert_eq!(calculate(4, 4), 85.0);
    }

    #[test]
    fn below_floor_is_linear() {
        let score = calculate(2, 4);
        assert!((score - 42.5).abs() < 1e-9);
    }
}
