use serde::{Deserialize, Serialize};

use super::{RankCalculation, UserStats};

/// Read-only projection served to the "my rank" view: the raw stats, a fresh
/// calculation, and a progress-rate extrapolation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankStatus {
    pub stats: UserStats,
    pub calculation: RankCalculation,
    /// Days to reach 100% at the observed percentage-per-day rate in the
    /// current tier. `None` when the rate is non-positive.
    pub estimated_days_to_next_tier: Option<i64>,
}
