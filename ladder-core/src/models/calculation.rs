use serde::{Deserialize, Serialize};

use crate::tier::Tier;

/// Per-criterion scores (each 0–100) before weighting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub time: f64,
    pub accuracy: f64,
    pub consistency: f64,
    pub volume: f64,
}

/// Output of one engine run for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankCalculation {
    /// Weighted, penalty-adjusted progress, clamped to [0, 100].
    pub percentage: f64,
    pub breakdown: ScoreBreakdown,
    /// True only when percentage >= 100, the next tier's time gate is met,
    /// and a next tier exists.
    pub eligible_for_upgrade: bool,
    pub next_tier: Option<Tier>,
    /// Human-readable unmet conditions, empty when eligible.
    pub blockers: Vec<String>,
}
