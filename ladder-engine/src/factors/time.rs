/// Time score: progress toward the next tier's account-age gate.
///
/// 100 when there is no next tier, or when the gate is already met;
/// otherwise linear `age / gate * 100`.
///
/// Range: 0.0 – 100.0.
pub fn calculate(account_age_days: i64, next_gate_days: Option<i64>) -> f64 {
    let gate = match next_gate_days {
        Some(days) if days > 0 => days,
        // Terminal tier, or a gate of zero — nothing left to wait for.
        _ => return 100.0,
    };

    let age = account_age_days.max(0);
    if age >= gate {
        100.0
    } else {
        age as f64 / gate as f64 * 100.0
    }
}
