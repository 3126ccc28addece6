use chrono::{DateTime, Utc};

use ladder_core::config::RankConfig;
use ladder_core::models::{RankCalculation, UserStats};

use crate::formula;

/// Rank calculation engine: the weighted formula plus the eligibility
/// verdict and its human-readable blockers.
///
/// Pure and deterministic; the same stats, table, and `now` always produce
/// the same calculation.
pub struct RankEngine {
    config: RankConfig,
}

impl RankEngine {
    /// Engine over the compiled-in production table.
    pub fn new() -> Self {
        Self {
            config: RankConfig::standard().clone(),
        }
    }

    /// Engine over a custom table (tests, experiments).
    pub fn with_config(config: RankConfig) -> Self {
        Self { config }
    }

    /// The table this engine scores against.
    pub fn config(&self) -> &RankConfig {
        &self.config
    }

    /// Score one user snapshot as of `now`.
    pub fn calculate(&self, stats: &UserStats, now: DateTime<Utc>) -> RankCalculation {
        let current = self.config.config_for(stats.tier);
        let next = self.config.next_tier(stats.tier);
        let next_gate_days = next.map(|t| t.min_time_gate_days);

        let score = formula::compute(stats, current, next_gate_days, now);
        let age = stats.account_age_days(now);

        let mut blockers = Vec::new();
        let eligible = match next {
            None => {
                blockers.push("already at maximum tier".to_string());
                false
            }
            Some(next_config) => {
                let percentage_met = score.percentage >= 100.0;
                let gate_met = age >= next_config.min_time_gate_days;
                if !percentage_met {
                    blockers.push(format!(
                        "{:.1} percentage points remaining",
                        100.0 - score.percentage
                    ));
                }
                if !gate_met {
                    blockers.push(format!(
                        "{} more days of account age required",
                        next_config.min_time_gate_days - age
                    ));
                }
                percentage_met && gate_met
            }
        };

        RankCalculation {
            percentage: score.percentage,
            breakdown: score.breakdown,
            eligible_for_upgrade: eligible,
            next_tier: next.map(|t| t.tier),
            blockers,
        }
    }
}

impl Default for RankEngine {
    fn default() -> Self {
        Self::new()
    }
}
