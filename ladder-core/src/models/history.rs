use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tier::Tier;

/// What caused a tier change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionTrigger {
    /// Promotion executed inline by a service recalculation.
    Recalculation,
    /// Promotion executed by the daily promotion sweep.
    AutoPromotion,
    /// Out-of-band admin override; the only trigger that may move backward
    /// or skip tiers.
    ManualOverride,
}

impl PromotionTrigger {
    pub fn as_str(self) -> &'static str {
        match self {
            PromotionTrigger::Recalculation => "recalculation",
            PromotionTrigger::AutoPromotion => "auto_promotion",
            PromotionTrigger::ManualOverride => "manual_override",
        }
    }
}

impl fmt::Display for PromotionTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append-only history row recording one tier change.
/// Never mutated or deleted once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankUpgrade {
    pub user_id: String,
    pub previous_tier: Tier,
    pub new_tier: Tier,
    pub achieved_at: DateTime<Utc>,
    pub percentage_at_upgrade: f64,
    pub days_in_previous_tier: i64,
    pub trigger: PromotionTrigger,
}
