/// Volume score from total predictions made.
///
/// 100 at 2× the tier's prediction floor, 85 at the floor, linear up to 85
/// below it. A floor of zero scores 100 outright.
///
/// Range: 0.0 – 100.0.
pub fn calculate(predictions_count: u64, min_predictions: u64) -> f64 {
    if min_predictions == 0 {
        return 100.0;
    }

    let count = predictions_count as f64;
    let floor = min_predictions as f64;

    if count >= floor * 2.0 {
        100.0
    } else if count >= floor {
        85.0
    } else {
        count / floor * 85.0
    }
}
