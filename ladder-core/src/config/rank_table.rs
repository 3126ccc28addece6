//! The static, compiled-in rank table: one entry per tier, fixed order.
//!
//! This table is the single source of truth for the scoring formula. Both
//! the service-path recalculation and the batch sweeps read it; there is no
//! second embedded copy anywhere.

use serde::{Deserialize, Serialize};

use crate::errors::{LadderResult, RankError};
use crate::tier::Tier;

/// Tolerance when checking that the four weights sum to 1.0.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Scoring thresholds and weights for one tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankCriteria {
    /// Volume floor: predictions made.
    pub min_predictions: u64,
    /// Accuracy floor (0–100) below which the accuracy score is 0.
    pub min_accuracy: f64,
    /// Resolved-count floor below which the accuracy score is 0 regardless
    /// of raw accuracy.
    pub min_resolved_predictions: u64,
    /// Consistency floor: distinct active weeks.
    pub min_active_weeks: u64,
    pub time_weight: f64,
    pub accuracy_weight: f64,
    pub consistency_weight: f64,
    pub volume_weight: f64,
}

impl RankCriteria {
    /// Sum of the four weights; must be 1.0 per tier.
    pub fn weight_sum(&self) -> f64 {
        self.time_weight + self.accuracy_weight + self.consistency_weight + self.volume_weight
    }
}

/// Full configuration for one tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierConfig {
    pub tier: Tier,
    /// Minimum account age (days) required to enter this tier, independent
    /// of percentage.
    pub min_time_gate_days: i64,
    pub criteria: RankCriteria,
}

/// The immutable, order-indexed table of all six tiers.
#[derive(Debug, Clone, PartialEq)]
pub struct RankConfig {
    tiers: [TierConfig; 6],
}

/// The production table. Accuracy carries more weight as tiers rise; time
/// matters most at the bottom where there is little else to measure.
static STANDARD: RankConfig = RankConfig {
    tiers: [
        TierConfig {
            tier: Tier::Novice,
            min_time_gate_days: 0,
            criteria: RankCriteria {
                min_predictions: 0,
                min_accuracy: 0.0,
                min_resolved_predictions: 0,
                min_active_weeks: 0,
                time_weight: 0.40,
                accuracy_weight: 0.20,
                consistency_weight: 0.20,
                volume_weight: 0.20,
            },
        },
        TierConfig {
            tier: Tier::Apprentice,
            min_time_gate_days: 7,
            criteria: RankCriteria {
                min_predictions: 10,
                min_accuracy: 40.0,
                min_resolved_predictions: 5,
                min_active_weeks: 2,
                time_weight: 0.30,
                accuracy_weight: 0.30,
                consistency_weight: 0.20,
                volume_weight: 0.20,
            },
        },
        TierConfig {
            tier: Tier::Analyst,
            min_time_gate_days: 30,
            criteria: RankCriteria {
                min_predictions: 30,
                min_accuracy: 50.0,
                min_resolved_predictions: 15,
                min_active_weeks: 4,
                time_weight: 0.20,
                accuracy_weight: 0.40,
                consistency_weight: 0.20,
                volume_weight: 0.20,
            },
        },
        TierConfig {
            tier: Tier::Forecaster,
            min_time_gate_days: 90,
            criteria: RankCriteria {
                min_predictions: 75,
                min_accuracy: 55.0,
                min_resolved_predictions: 40,
                min_active_weeks: 8,
                time_weight: 0.15,
                accuracy_weight: 0.45,
                consistency_weight: 0.20,
                volume_weight: 0.20,
            },
        },
        TierConfig {
            tier: Tier::Oracle,
            min_time_gate_days: 180,
            criteria: RankCriteria {
                min_predictions: 150,
                min_accuracy: 60.0,
                min_resolved_predictions: 80,
                min_active_weeks: 16,
                time_weight: 0.10,
                accuracy_weight: 0.50,
                consistency_weight: 0.20,
                volume_weight: 0.20,
            },
        },
        TierConfig {
            tier: Tier::Legend,
            min_time_gate_days: 365,
            criteria: RankCriteria {
                min_predictions: 300,
                min_accuracy: 65.0,
                min_resolved_predictions: 150,
                min_active_weeks: 32,
                time_weight: 0.10,
                accuracy_weight: 0.55,
                consistency_weight: 0.20,
                volume_weight: 0.15,
            },
        },
    ],
};

impl RankConfig {
    /// The compiled-in production table.
    pub fn standard() -> &'static RankConfig {
        &STANDARD
    }

    /// Build a table from explicit entries (tests, experiments).
    pub fn from_tiers(tiers: [TierConfig; 6]) -> Self {
        Self { tiers }
    }

    /// All tiers in ladder order.
    pub fn tiers(&self) -> &[TierConfig; 6] {
        &self.tiers
    }

    /// The entry for a given tier.
    pub fn config_for(&self, tier: Tier) -> &TierConfig {
        &self.tiers[tier.index()]
    }

    /// The entry for the tier above, or `None` for the terminal tier.
    pub fn next_tier(&self, tier: Tier) -> Option<&TierConfig> {
        tier.next().map(|next| self.config_for(next))
    }

    /// Startup validation: entry order matches the chain and every tier's
    /// weights sum to 1.0 within tolerance.
    pub fn validate(&self) -> LadderResult<()> {
        for (idx, entry) in self.tiers.iter().enumerate() {
            if entry.tier.index() != idx {
                return Err(RankError::InvalidConfig {
                    reason: format!(
                        "tier {} at position {idx}, expected {}",
                        entry.tier,
                        Tier::ORDERED[idx]
                    ),
                }
                .into());
            }
            let sum = entry.criteria.weight_sum();
            if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
                return Err(RankError::InvalidConfig {
                    reason: format!("tier {} weights sum to {sum}, expected 1.0", entry.tier),
                }
                .into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_validates() {
        RankConfig::standard().validate().unwrap();
    }

    #[test]
    fn gates_are_monotonically_increasing() {
        let gates: Vec<i64> = RankConfig::standard()
            .tiers()
            .iter()
            .map(|t| t.min_time_gate_days)
            .collect();
        for pair in gates.windows(2) {
            assert!(pair[0] < pair[1], "gates not increasing: {gates:?}");
        }
    }

    #[test]
    fn next_tier_resolution_stops_at_terminal() {
        let config = RankConfig::standard();
        assert_eq!(
            config.next_tier(Tier::Novice).map(|t| t.tier),
            Some(Tier::Apprentice)
        );
        assert!(config.next_tier(Tier::Legend).is_none());
    }

    #[test]
    fn bad_weight_sum_is_rejected() {
        let mut tiers = *RankConfig::standard().tiers();
        tiers[2].criteria.time_weight += 0.1;
        let config = RankConfig::from_tiers(tiers);
        assert!(config.validate().is_err());
    }

    #[test]
    fn out_of_order_table_is_rejected() {
        let mut tiers = *RankConfig::standard().tiers();
        tiers.swap(0, 1);
        let config = RankConfig::from_tiers(tiers);
        assert!(config.validate().is_err());
    }
}
